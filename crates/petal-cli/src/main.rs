use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "petal-cli", version, about = "Petal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's metrics, chores, sticker and streaks
    Today {
        #[command(subcommand)]
        action: commands::today::TodayAction,
    },
    /// Goal thresholds
    Goals {
        #[command(subcommand)]
        action: commands::goals::GoalsAction,
    },
    /// Recurring chores
    Chores {
        #[command(subcommand)]
        action: commands::chores::ChoresAction,
    },
    /// Food catalog and calorie log
    Nutrition {
        #[command(subcommand)]
        action: commands::nutrition::NutritionAction,
    },
    /// Workout log
    Workouts {
        #[command(subcommand)]
        action: commands::workouts::WorkoutsAction,
    },
    /// Month view and trackers
    Month {
        #[command(subcommand)]
        action: commands::month::MonthAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today { action } => commands::today::run(action),
        Commands::Goals { action } => commands::goals::run(action),
        Commands::Chores { action } => commands::chores::run(action),
        Commands::Nutrition { action } => commands::nutrition::run(action),
        Commands::Workouts { action } => commands::workouts::run(action),
        Commands::Month { action } => commands::month::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
