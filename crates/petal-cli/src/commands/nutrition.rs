//! Food catalog and calorie log commands.

use std::collections::BTreeMap;

use clap::Subcommand;
use petal_core::calendar::{self, week_dates};
use petal_core::nutrition::{calories_for_date, weekly_count_by_food};
use petal_core::FoodItem;
use serde::Serialize;
use uuid::Uuid;

const DEFAULT_COLOR: &str = "#f9a8d4";

#[derive(Subcommand)]
pub enum NutritionAction {
    /// List the food catalog
    List,
    /// Add a food item
    Add {
        /// Food title
        title: String,
        /// Calories per serving
        kcal: u32,
        /// Display color for the food chip
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
    },
    /// Edit a food item
    Edit {
        /// Food ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        kcal: Option<u32>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a food item and strip it from the log
    Remove {
        /// Food ID
        id: String,
    },
    /// Toggle a food on a date's log
    Toggle {
        /// Food ID
        id: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Calories for one day
    Day {
        #[arg(long)]
        date: Option<String>,
    },
    /// Daily calories and per-food counts for the week containing a date
    Week {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayCalories {
    date: String,
    kcal: u32,
    foods: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekReport {
    days: Vec<DayCalories>,
    count_by_food: BTreeMap<String, u32>,
}

pub fn run(action: NutritionAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut state) = super::load()?;

    match action {
        NutritionAction::List => {
            println!("{}", serde_json::to_string_pretty(&state.food_items)?);
        }
        NutritionAction::Add { title, kcal, color } => {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err("title must not be empty".into());
            }
            let item = FoodItem {
                id: Uuid::new_v4().to_string(),
                title,
                kcal_per_serving: kcal,
                color,
            };
            state.food_items.push(item.clone());
            super::persist(&store, &state);
            println!("Food created: {}", item.id);
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        NutritionAction::Edit {
            id,
            title,
            kcal,
            color,
        } => {
            let item = state
                .food_items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or_else(|| format!("no food with id '{id}'"))?;
            if let Some(title) = title {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err("title must not be empty".into());
                }
                item.title = title;
            }
            if let Some(kcal) = kcal {
                item.kcal_per_serving = kcal;
            }
            if let Some(color) = color {
                item.color = color;
            }
            let updated = item.clone();
            super::persist(&store, &state);
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        NutritionAction::Remove { id } => {
            if !state.remove_food_item(&id) {
                return Err(format!("no food with id '{id}'").into());
            }
            super::persist(&store, &state);
            println!("Food removed: {id}");
        }
        NutritionAction::Toggle { id, date } => {
            let date_key = super::resolve_date_key(date)?;
            match state.toggle_food(&date_key, &id) {
                Some(logged) => {
                    super::persist(&store, &state);
                    let kcal = calories_for_date(&date_key, &state.food_items, &state.food_log_by_date);
                    if logged {
                        println!("Food logged on {date_key} ({kcal} kcal total)");
                    } else {
                        println!("Food unlogged on {date_key} ({kcal} kcal total)");
                    }
                }
                None => return Err(format!("no food with id '{id}'").into()),
            }
        }
        NutritionAction::Day { date } => {
            let date_key = super::resolve_date_key(date)?;
            println!("{}", serde_json::to_string_pretty(&day_calories(&state, &date_key))?);
        }
        NutritionAction::Week { date } => {
            let date_key = super::resolve_date_key(date)?;
            let reference = calendar::parse_date_key(&date_key)
                .ok_or_else(|| format!("invalid date key '{date_key}'"))?;
            let week = week_dates(reference);
            let week_keys: Vec<String> = week.iter().map(|day| day.key.clone()).collect();
            let report = WeekReport {
                days: week_keys
                    .iter()
                    .map(|key| day_calories(&state, key))
                    .collect(),
                count_by_food: weekly_count_by_food(&state.food_log_by_date, &week_keys),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn day_calories(state: &petal_core::AppState, date_key: &str) -> DayCalories {
    DayCalories {
        date: date_key.to_string(),
        kcal: calories_for_date(date_key, &state.food_items, &state.food_log_by_date),
        foods: state
            .food_log_by_date
            .get(date_key)
            .cloned()
            .unwrap_or_default(),
    }
}
