//! Workout log commands.

use std::collections::BTreeMap;

use clap::Subcommand;
use petal_core::calendar::{self, week_dates};
use petal_core::workout::weekly_count_by_type;
use petal_core::WorkoutType;
use serde::Serialize;

#[derive(Subcommand)]
pub enum WorkoutsAction {
    /// List workout types
    Types,
    /// Record the workout type for a date
    Set {
        /// Workout type id (gym, fullBody, legs, cardio, rest)
        kind: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Clear the workout for a date
    Clear {
        #[arg(long)]
        date: Option<String>,
    },
    /// The week's workouts and per-type counts
    Week {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TypeLine {
    id: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekDayLine {
    date: String,
    day_of_month: u32,
    workout: Option<WorkoutType>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekReport {
    days: Vec<WeekDayLine>,
    count_by_type: BTreeMap<WorkoutType, u32>,
}

pub fn run(action: WorkoutsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut state) = super::load()?;

    match action {
        WorkoutsAction::Types => {
            let types: Vec<TypeLine> = WorkoutType::ALL
                .into_iter()
                .map(|kind| TypeLine {
                    id: kind.id(),
                    label: kind.label(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&types)?);
        }
        WorkoutsAction::Set { kind, date } => {
            let kind = WorkoutType::from_id(&kind).ok_or_else(|| {
                format!(
                    "unknown workout type '{kind}' (expected one of: {})",
                    WorkoutType::ALL.map(|kind| kind.id()).join(", ")
                )
            })?;
            let date_key = super::resolve_date_key(date)?;
            state.set_workout(&date_key, Some(kind));
            super::persist(&store, &state);
            println!("Workout for {date_key}: {}", kind.id());
        }
        WorkoutsAction::Clear { date } => {
            let date_key = super::resolve_date_key(date)?;
            state.set_workout(&date_key, None);
            super::persist(&store, &state);
            println!("Workout cleared for {date_key}");
        }
        WorkoutsAction::Week { date } => {
            let date_key = super::resolve_date_key(date)?;
            let reference = calendar::parse_date_key(&date_key)
                .ok_or_else(|| format!("invalid date key '{date_key}'"))?;
            let week = week_dates(reference);
            let week_keys: Vec<String> = week.iter().map(|day| day.key.clone()).collect();
            let report = WeekReport {
                days: week
                    .into_iter()
                    .map(|day| WeekDayLine {
                        workout: state.workout_log_by_date.get(&day.key).copied(),
                        date: day.key,
                        day_of_month: day.day_of_month,
                    })
                    .collect(),
                count_by_type: weekly_count_by_type(&state.workout_log_by_date, &week_keys),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
