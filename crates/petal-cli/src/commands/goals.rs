//! Goal threshold commands.

use clap::Subcommand;
use petal_core::calendar;

#[derive(Subcommand)]
pub enum GoalsAction {
    /// Show current goals
    Show,
    /// Update goal thresholds. A goal of 0 disables its metric.
    Set {
        /// Daily water target in milliliters
        #[arg(long)]
        water_ml: Option<f64>,
        /// Daily step target
        #[arg(long)]
        steps: Option<f64>,
        /// Daily sleep target in hours
        #[arg(long)]
        sleep_hours: Option<f64>,
    },
}

pub fn run(action: GoalsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut state) = super::load()?;

    match action {
        GoalsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&state.goals)?);
        }
        GoalsAction::Set {
            water_ml,
            steps,
            sleep_hours,
        } => {
            if water_ml.is_none() && steps.is_none() && sleep_hours.is_none() {
                return Err("nothing to set: pass --water-ml, --steps or --sleep-hours".into());
            }
            if let Some(value) = water_ml {
                state.goals.water_ml = non_negative(value, "--water-ml")?;
            }
            if let Some(value) = steps {
                state.goals.steps = non_negative(value, "--steps")?;
            }
            if let Some(value) = sleep_hours {
                state.goals.sleep_hours = non_negative(value, "--sleep-hours")?;
            }
            // Closure depends on the goals, so the derived streaks move too
            state.recalculate_streaks(calendar::today());
            super::persist(&store, &state);
            println!("{}", serde_json::to_string_pretty(&state.goals)?);
        }
    }
    Ok(())
}

fn non_negative(value: f64, name: &str) -> Result<f64, Box<dyn std::error::Error>> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{name} must be zero or a positive number").into());
    }
    Ok(value)
}
