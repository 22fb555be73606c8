//! Recurring chore commands.

use clap::Subcommand;
use petal_core::calendar::{self, week_dates, week_start};
use petal_core::chore::planned_chore_ids;
use petal_core::{Chore, Schedule};
use serde::Serialize;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum ChoresAction {
    /// List chores with their schedules
    List,
    /// Add a chore
    Add {
        /// Chore title
        title: String,
        /// Weekday numbers 0-6 (0 = Sunday), comma-separated
        #[arg(long)]
        days: Option<String>,
        /// Scope the schedule to the current week only
        #[arg(long)]
        this_week: bool,
        /// Scope the schedule to the week containing this date key
        #[arg(long, conflicts_with = "this_week")]
        week_of: Option<String>,
    },
    /// Edit a chore's title, schedule or active flag
    Edit {
        /// Chore ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// New weekday numbers 0-6, comma-separated; an empty value clears
        /// the schedule
        #[arg(long)]
        days: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a chore and strip it from the completion history
    Remove {
        /// Chore ID
        id: String,
    },
    /// Toggle a chore's completion mark for a date
    Toggle {
        /// Chore ID
        id: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Plan for the week containing a date
    Week {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekPlanDay {
    date: String,
    day_of_month: u32,
    chores: Vec<WeekPlanChore>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekPlanChore {
    id: String,
    title: String,
    done: bool,
}

pub fn run(action: ChoresAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut state) = super::load()?;

    match action {
        ChoresAction::List => {
            println!("{}", serde_json::to_string_pretty(&state.chores)?);
        }
        ChoresAction::Add {
            title,
            days,
            this_week,
            week_of,
        } => {
            let title = normalized_title(&title)?;
            let schedule = match days {
                Some(raw) => parse_schedule(&raw)?,
                None => Schedule::None,
            };
            let starts_on = anchor_week(this_week, week_of)?;
            if starts_on.is_some() && schedule == Schedule::None {
                return Err("a week anchor needs --days to schedule against".into());
            }
            let chore = Chore {
                id: Uuid::new_v4().to_string(),
                title,
                schedule,
                starts_on,
                is_active: true,
            };
            state.chores.push(chore.clone());
            super::persist(&store, &state);
            println!("Chore created: {}", chore.id);
            println!("{}", serde_json::to_string_pretty(&chore)?);
        }
        ChoresAction::Edit {
            id,
            title,
            days,
            active,
        } => {
            let schedule = days.map(|raw| parse_schedule(&raw)).transpose()?;
            let title = title.map(|raw| normalized_title(&raw)).transpose()?;
            let chore = state
                .chores
                .iter_mut()
                .find(|chore| chore.id == id)
                .ok_or_else(|| format!("no chore with id '{id}'"))?;
            if let Some(title) = title {
                chore.title = title;
            }
            if let Some(schedule) = schedule {
                chore.schedule = schedule;
            }
            if let Some(active) = active {
                chore.is_active = active;
            }
            let updated = chore.clone();
            super::persist(&store, &state);
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        ChoresAction::Remove { id } => {
            if !state.remove_chore(&id) {
                return Err(format!("no chore with id '{id}'").into());
            }
            super::persist(&store, &state);
            println!("Chore removed: {id}");
        }
        ChoresAction::Toggle { id, date } => {
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
        ChoresAction::Week { date } => {
            let date_key = super::resolve_date_key(date)?;
            let reference = calendar::parse_date_key(&date_key)
                .ok_or_else(|| format!("invalid date key '{date_key}'"))?;
            let plan: Vec<WeekPlanDay> = week_dates(reference)
                .into_iter()
                .map(|day| {
                    let completed = state
                        .chore_log_by_date
                        .get(&day.key)
                        .cloned()
                        .unwrap_or_default();
                    let day_date = calendar::parse_date_key(&day.key);
                    let chores = day_date
                        .map(|date| planned_chore_ids(&state.chores, date, &completed))
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|id| {
                            let chore = state.chores.iter().find(|chore| chore.id == id)?;
                            Some(WeekPlanChore {
                                done: completed.contains(&chore.id),
                                id: chore.id.clone(),
                                title: chore.title.clone(),
                            })
                        })
                        .collect();
                    WeekPlanDay {
                        date: day.key,
                        day_of_month: day.day_of_month,
                        chores,
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }
    Ok(())
}

fn normalized_title(raw: &str) -> Result<String, Box<dyn std::error::Error>> {
    let title = raw.trim();
    if title.is_empty() {
        return Err("title must not be empty".into());
    }
    Ok(title.to_string())
}

/// Parse a comma-separated weekday list; an empty string clears the
/// schedule.
fn parse_schedule(raw: &str) -> Result<Schedule, Box<dyn std::error::Error>> {
    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let day: u8 = part
            .parse()
            .map_err(|_| format!("invalid weekday '{part}' (expected 0-6, 0 = Sunday)"))?;
        if day > 6 {
            return Err(format!("invalid weekday '{part}' (expected 0-6, 0 = Sunday)").into());
        }
        days.push(day);
    }
    Ok(Schedule::from_weekdays(&days))
}

/// Resolve the optional week anchor to the Monday key of that week.
fn anchor_week(
    this_week: bool,
    week_of: Option<String>,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if this_week {
        return Ok(Some(calendar::format_date_key(week_start(calendar::today()))));
    }
    match week_of {
        Some(key) => {
            let date = calendar::parse_date_key(&key)
                .ok_or_else(|| format!("invalid date key '{key}' (expected YYYY-MM-DD)"))?;
            Ok(Some(calendar::format_date_key(week_start(date))))
        }
        None => Ok(None),
    }
}
