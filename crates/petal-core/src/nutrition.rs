//! Food catalog and calorie arithmetic.
//!
//! Foods are reusable catalog entries; the per-day log stores ids only.
//! Calories are always derived from the catalog at read time, so editing a
//! food's calories retroactively updates every day it was logged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A reusable food catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub title: String,
    pub kcal_per_serving: u32,
    /// Display color for the food chip, as a CSS color string
    pub color: String,
}

/// Total calories for a list of logged food ids.
///
/// Ids missing from the catalog contribute zero.
pub fn calories_for_food_ids(food_ids: &[String], items: &[FoodItem]) -> u32 {
    food_ids
        .iter()
        .filter_map(|id| items.iter().find(|item| item.id == *id))
        .map(|item| item.kcal_per_serving)
        .sum()
}

/// Total calories logged on one date.
pub fn calories_for_date(
    date_key: &str,
    items: &[FoodItem],
    food_log: &BTreeMap<String, Vec<String>>,
) -> u32 {
    food_log
        .get(date_key)
        .map(|ids| calories_for_food_ids(ids, items))
        .unwrap_or(0)
}

/// How many days of the given week each food was logged on.
pub fn weekly_count_by_food(
    food_log: &BTreeMap<String, Vec<String>>,
    week_keys: &[String],
) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for key in week_keys {
        let Some(ids) = food_log.get(key) else {
            continue;
        };
        for id in ids {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Strip a deleted food from every day of the log.
pub fn remove_food_from_log(log: &mut BTreeMap<String, Vec<String>>, food_id: &str) {
    for ids in log.values_mut() {
        ids.retain(|id| id != food_id);
    }
    log.retain(|_, ids| !ids.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<FoodItem> {
        vec![
            FoodItem {
                id: "oats".to_string(),
                title: "Овсянка".to_string(),
                kcal_per_serving: 350,
                color: "#f9a8d4".to_string(),
            },
            FoodItem {
                id: "salad".to_string(),
                title: "Салат".to_string(),
                kcal_per_serving: 120,
                color: "#a7f3d0".to_string(),
            },
        ]
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_calories_sum_over_logged_ids() {
        assert_eq!(calories_for_food_ids(&ids(&["oats", "salad"]), &catalog()), 470);
        // Duplicates count twice: two servings logged
        assert_eq!(calories_for_food_ids(&ids(&["salad", "salad"]), &catalog()), 240);
    }

    #[test]
    fn test_unknown_ids_contribute_zero() {
        assert_eq!(calories_for_food_ids(&ids(&["ghost"]), &catalog()), 0);
        assert_eq!(calories_for_food_ids(&ids(&["ghost", "oats"]), &catalog()), 350);
    }

    #[test]
    fn test_calories_for_date() {
        let mut log = BTreeMap::new();
        log.insert("2024-01-01".to_string(), ids(&["oats", "salad"]));

        assert_eq!(calories_for_date("2024-01-01", &catalog(), &log), 470);
        assert_eq!(calories_for_date("2024-01-02", &catalog(), &log), 0);
    }

    #[test]
    fn test_weekly_count_by_food() {
        let mut log = BTreeMap::new();
        log.insert("2024-01-01".to_string(), ids(&["oats"]));
        log.insert("2024-01-02".to_string(), ids(&["oats", "salad"]));
        log.insert("2024-01-09".to_string(), ids(&["oats"]));

        let week_keys = ids(&[
            "2024-01-01",
            "2024-01-02",
            "2024-01-03",
            "2024-01-04",
            "2024-01-05",
            "2024-01-06",
            "2024-01-07",
        ]);
        let counts = weekly_count_by_food(&log, &week_keys);
        assert_eq!(counts.get("oats"), Some(&2));
        assert_eq!(counts.get("salad"), Some(&1));
    }

    #[test]
    fn test_remove_food_from_log() {
        let mut log = BTreeMap::new();
        log.insert("2024-01-01".to_string(), ids(&["oats", "salad"]));
        log.insert("2024-01-02".to_string(), ids(&["oats"]));

        remove_food_from_log(&mut log, "oats");

        assert_eq!(log.get("2024-01-01"), Some(&ids(&["salad"])));
        assert!(!log.contains_key("2024-01-02"));
    }
}
