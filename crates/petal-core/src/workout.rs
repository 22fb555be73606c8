//! Workout log types and weekly tallies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of workout recorded for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkoutType {
    Gym,
    FullBody,
    Legs,
    Cardio,
    Rest,
}

impl WorkoutType {
    /// All types, in display order.
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Gym,
        WorkoutType::FullBody,
        WorkoutType::Legs,
        WorkoutType::Cardio,
        WorkoutType::Rest,
    ];

    /// Stable id used in the persisted document.
    pub fn id(&self) -> &'static str {
        match self {
            WorkoutType::Gym => "gym",
            WorkoutType::FullBody => "fullBody",
            WorkoutType::Legs => "legs",
            WorkoutType::Cardio => "cardio",
            WorkoutType::Rest => "rest",
        }
    }

    /// Parse a persisted or user-supplied id.
    pub fn from_id(id: &str) -> Option<WorkoutType> {
        WorkoutType::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Gym => "Зал",
            WorkoutType::FullBody => "Всё тело",
            WorkoutType::Legs => "Ноги",
            WorkoutType::Cardio => "Кардио",
            WorkoutType::Rest => "Отдых",
        }
    }
}

/// Workouts per type across the given week keys.
///
/// Types without a logged day are present with a zero count, so a week
/// summary always lists the full set.
pub fn weekly_count_by_type(
    workout_log: &BTreeMap<String, WorkoutType>,
    week_keys: &[String],
) -> BTreeMap<WorkoutType, u32> {
    let mut counts: BTreeMap<WorkoutType, u32> =
        WorkoutType::ALL.into_iter().map(|kind| (kind, 0)).collect();
    for key in week_keys {
        if let Some(kind) = workout_log.get(key) {
            *counts.entry(*kind).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trips() {
        for kind in WorkoutType::ALL {
            assert_eq!(WorkoutType::from_id(kind.id()), Some(kind));
        }
        assert_eq!(WorkoutType::from_id("yoga"), None);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_string(&WorkoutType::FullBody).unwrap();
        assert_eq!(json, r#""fullBody""#);
        let parsed: WorkoutType = serde_json::from_str(r#""cardio""#).unwrap();
        assert_eq!(parsed, WorkoutType::Cardio);
    }

    #[test]
    fn test_weekly_count_by_type() {
        let mut log = BTreeMap::new();
        log.insert("2024-01-01".to_string(), WorkoutType::Gym);
        log.insert("2024-01-02".to_string(), WorkoutType::Cardio);
        log.insert("2024-01-03".to_string(), WorkoutType::Gym);
        // Outside the week
        log.insert("2024-01-09".to_string(), WorkoutType::Legs);

        let week_keys: Vec<String> = (1..=7).map(|day| format!("2024-01-0{day}")).collect();
        let counts = weekly_count_by_type(&log, &week_keys);

        assert_eq!(counts[&WorkoutType::Gym], 2);
        assert_eq!(counts[&WorkoutType::Cardio], 1);
        assert_eq!(counts[&WorkoutType::Legs], 0);
        assert_eq!(counts[&WorkoutType::Rest], 0);
        assert_eq!(counts.len(), WorkoutType::ALL.len());
    }
}
