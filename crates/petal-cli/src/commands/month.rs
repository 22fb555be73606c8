//! Month view and tracker commands.

use clap::Subcommand;
use petal_core::calendar::{self, date_keys_of_month, format_month_key};
use petal_core::progress::sleep_band;
use petal_core::tracker::monthly_count;
use petal_core::{DayMetrics, MonthTracker, SleepBand, TrackerColor};
use serde::Serialize;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum MonthAction {
    /// Month overview: sleep bands, stickers and tracker marks per day
    Show {
        /// Any date inside the month, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Set exact metric values for a date
    SetMetrics {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        water_ml: Option<f64>,
        #[arg(long)]
        steps: Option<f64>,
        #[arg(long)]
        sleep_hours: Option<f64>,
        #[arg(long)]
        workout_done: Option<bool>,
    },
    /// List month trackers
    Trackers,
    /// Add a month tracker
    AddTracker {
        /// Tracker title
        title: String,
        /// Palette color (green, mint, sky, amber, rose)
        #[arg(long, default_value = "rose")]
        color: String,
    },
    /// Delete a month tracker and its marks
    RemoveTracker {
        /// Tracker ID
        id: String,
    },
    /// Toggle a tracker mark on a date
    Toggle {
        /// Tracker ID
        id: String,
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthDayLine {
    date: String,
    day_of_month: u32,
    sleep_band: SleepBand,
    sticker: Option<&'static str>,
    trackers: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackerCountLine {
    id: String,
    title: String,
    days_marked: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthReport {
    month: String,
    days: Vec<MonthDayLine>,
    tracker_counts: Vec<TrackerCountLine>,
}

pub fn run(action: MonthAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut state) = super::load()?;

    match action {
        MonthAction::Show { date } => {
            let date_key = super::resolve_date_key(date)?;
            let reference = calendar::parse_date_key(&date_key)
                .ok_or_else(|| format!("invalid date key '{date_key}'"))?;
            let month_keys = date_keys_of_month(reference);

            let days = month_keys
                .iter()
                .enumerate()
                .map(|(index, key)| MonthDayLine {
                    date: key.clone(),
                    day_of_month: index as u32 + 1,
                    sleep_band: sleep_band(&state.metrics_for(key)),
                    sticker: state.sticker_for(key).map(|sticker| sticker.id()),
                    trackers: state
                        .month_tracker_log_by_date
                        .get(key)
                        .cloned()
                        .unwrap_or_default(),
                })
                .collect();
            let tracker_counts = state
                .month_trackers
                .iter()
                .map(|tracker| TrackerCountLine {
                    id: tracker.id.clone(),
                    title: tracker.title.clone(),
                    days_marked: monthly_count(
                        &state.month_tracker_log_by_date,
                        &tracker.id,
                        &month_keys,
                    ),
                })
                .collect();

            let report = MonthReport {
                month: format_month_key(reference),
                days,
                tracker_counts,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        MonthAction::SetMetrics {
            date,
            water_ml,
            steps,
            sleep_hours,
            workout_done,
        } => {
            if water_ml.is_none() && steps.is_none() && sleep_hours.is_none() && workout_done.is_none()
            {
                return Err(
                    "nothing to set: pass --water-ml, --steps, --sleep-hours or --workout-done"
                        .into(),
                );
            }
            for value in [water_ml, steps, sleep_hours].into_iter().flatten() {
                if !value.is_finite() || value < 0.0 {
                    return Err("metric values must be zero or positive".into());
                }
            }
            let date_key = super::resolve_date_key(date)?;
            let patch = DayMetrics {
                water_ml,
                steps,
                sleep_hours,
                workout_done,
            };
            state
                .upsert_metrics(&date_key, &patch)
                .ok_or_else(|| format!("invalid date key '{date_key}'"))?;
            state.recalculate_streaks(calendar::today());
            super::persist(&store, &state);
            println!("{}", serde_json::to_string_pretty(&state.metrics_for(&date_key))?);
        }
        MonthAction::Trackers => {
            println!("{}", serde_json::to_string_pretty(&state.month_trackers)?);
        }
        MonthAction::AddTracker { title, color } => {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err("title must not be empty".into());
            }
            let color = TrackerColor::from_id(&color).ok_or_else(|| {
                format!(
                    "unknown color '{color}' (expected one of: {})",
                    TrackerColor::ALL.map(|color| color.id()).join(", ")
                )
            })?;
            let tracker = MonthTracker {
                id: Uuid::new_v4().to_string(),
                title,
                color,
            };
            state.month_trackers.push(tracker.clone());
            super::persist(&store, &state);
            println!("Tracker created: {}", tracker.id);
            println!("{}", serde_json::to_string_pretty(&tracker)?);
        }
        MonthAction::RemoveTracker { id } => {
            if !state.remove_month_tracker(&id) {
                return Err(format!("no tracker with id '{id}'").into());
            }
            super::persist(&store, &state);
            println!("Tracker removed: {id}");
        }
        MonthAction::Toggle { id, date } => {
            let date_key = super::resolve_date_key(date)?;
            match state.toggle_tracker(&date_key, &id) {
                Some(marked) => {
                    super::persist(&store, &state);
                    if marked {
                        println!("Tracker marked on {date_key}");
                    } else {
                        println!("Tracker mark cleared on {date_key}");
                    }
                }
                None => return Err(format!("no tracker with id '{id}'").into()),
            }
        }
    }
    Ok(())
}
