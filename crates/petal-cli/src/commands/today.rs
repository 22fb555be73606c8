//! Today screen commands: log metrics, toggle chores, show the summary.

use clap::Subcommand;
use petal_core::calendar;
use petal_core::chore::planned_chore_ids;
use petal_core::{
    AppState, DayMetrics, DayProgress, ProgressTransition, StateStore, StreakBadge, StreakState,
};
use serde::Serialize;

const WATER_CLOSED_PHRASE: &str = "Вода закрыта. Ты в отличном ритме.";
const SLEEP_CLOSED_PHRASE: &str = "Сон закрыт. Тело скажет спасибо.";
const DAY_CLOSED_PHRASE: &str = "День закрыт. Забирай стикер и гордись собой.";

#[derive(Subcommand)]
pub enum TodayAction {
    /// Show the day's summary
    Show {
        /// Date key (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a water portion in milliliters
    Water {
        amount: f64,
        #[arg(long)]
        date: Option<String>,
    },
    /// Add slept hours
    Sleep {
        hours: f64,
        #[arg(long)]
        date: Option<String>,
    },
    /// Add walked steps
    Steps {
        amount: f64,
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark the day's workout as done (or not)
    Workout {
        #[arg(default_value = "true")]
        done: bool,
        #[arg(long)]
        date: Option<String>,
    },
    /// Toggle a chore's completion mark
    Chore {
        id: String,
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChoreLine {
    id: String,
    title: String,
    done: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TodaySummary {
    date: String,
    metrics: DayMetrics,
    progress: DayProgress,
    sticker: Option<&'static str>,
    sticker_phrase: Option<&'static str>,
    streaks: StreakState,
    streak_badge: StreakBadge,
    streak_badge_title: &'static str,
    chores: Vec<ChoreLine>,
}

pub fn run(action: TodayAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut state) = super::load()?;

    match action {
        TodayAction::Show { date } => {
            let date_key = super::resolve_date_key(date)?;
            // The screen refreshes the day's sticker and streaks on open
            state.assign_sticker(&date_key);
            state.recalculate_streaks(calendar::today());
            super::persist(&store, &state);
            println!("{}", serde_json::to_string_pretty(&summary(&state, &date_key))?);
        }
        TodayAction::Water { amount, date } => {
            let date_key = super::resolve_date_key(date)?;
            let current = state.metrics_for(&date_key).water_ml.unwrap_or(0.0);
            let patch = DayMetrics {
                water_ml: Some(current + positive(amount, "amount")?),
                ..DayMetrics::default()
            };
            log_metrics(&store, &mut state, &date_key, &patch)?;
        }
        TodayAction::Sleep { hours, date } => {
            let date_key = super::resolve_date_key(date)?;
            let current = state.metrics_for(&date_key).sleep_hours.unwrap_or(0.0);
            let patch = DayMetrics {
                sleep_hours: Some(current + positive(hours, "hours")?),
                ..DayMetrics::default()
            };
            log_metrics(&store, &mut state, &date_key, &patch)?;
        }
        TodayAction::Steps { amount, date } => {
            let date_key = super::resolve_date_key(date)?;
            let current = state.metrics_for(&date_key).steps.unwrap_or(0.0);
            let patch = DayMetrics {
                steps: Some(current + positive(amount, "amount")?),
                ..DayMetrics::default()
            };
            log_metrics(&store, &mut state, &date_key, &patch)?;
        }
        TodayAction::Workout { done, date } => {
            let date_key = super::resolve_date_key(date)?;
            let patch = DayMetrics {
                workout_done: Some(done),
                ..DayMetrics::default()
            };
            log_metrics(&store, &mut state, &date_key, &patch)?;
        }
        TodayAction::Chore { id, date } => {
            let date_key = super::resolve_date_key(date)?;
            match state.toggle_chore(&date_key, &id) {
                Some(marked) => {
                    super::persist(&store, &state);
                    if marked {
                        println!("Chore marked done on {date_key}");
                    } else {
                        println!("Chore mark cleared on {date_key}");
                    }
                }
                None => return Err(format!("chore '{id}' cannot be toggled on {date_key}").into()),
            }
        }
    }
    Ok(())
}

fn positive(value: f64, name: &str) -> Result<f64, Box<dyn std::error::Error>> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{name} must be a positive number").into());
    }
    Ok(value)
}

fn log_metrics(
    store: &StateStore,
    state: &mut AppState,
    date_key: &str,
    patch: &DayMetrics,
) -> Result<(), Box<dyn std::error::Error>> {
    let transition = state
        .upsert_metrics(date_key, patch)
        .ok_or_else(|| format!("invalid date key '{date_key}'"))?;
    state.recalculate_streaks(calendar::today());
    super::persist(store, state);

    println!("{}", serde_json::to_string_pretty(&state.metrics_for(date_key))?);
    if let Some(phrase) = motivation(&transition) {
        println!("{phrase}");
    }
    Ok(())
}

// Later transitions win: closing the whole day trumps closing one tracker.
fn motivation(transition: &ProgressTransition) -> Option<&'static str> {
    if !transition.before.day_closed && transition.after.day_closed {
        Some(DAY_CLOSED_PHRASE)
    } else if !transition.before.sleep_closed && transition.after.sleep_closed {
        Some(SLEEP_CLOSED_PHRASE)
    } else if !transition.before.water_closed && transition.after.water_closed {
        Some(WATER_CLOSED_PHRASE)
    } else {
        None
    }
}

fn summary(state: &AppState, date_key: &str) -> TodaySummary {
    let completed = state
        .chore_log_by_date
        .get(date_key)
        .cloned()
        .unwrap_or_default();
    let chores = calendar::parse_date_key(date_key)
        .map(|date| planned_chore_ids(&state.chores, date, &completed))
        .unwrap_or_default()
        .into_iter()
        .filter_map(|id| {
            let chore = state.chores.iter().find(|chore| chore.id == id)?;
            Some(ChoreLine {
                done: completed.contains(&chore.id),
                id: chore.id.clone(),
                title: chore.title.clone(),
            })
        })
        .collect();

    let badge = StreakBadge::for_days(state.streaks.current_days);
    let sticker = state.sticker_for(date_key);
    TodaySummary {
        date: date_key.to_string(),
        metrics: state.metrics_for(date_key),
        progress: petal_core::day_progress(&state.metrics_for(date_key), &state.goals),
        sticker: sticker.map(|sticker| sticker.id()),
        sticker_phrase: sticker.map(|sticker| sticker.phrase()),
        streaks: state.streaks,
        streak_badge: badge,
        streak_badge_title: badge.title(),
        chores,
    }
}
