//! The persisted application state document.
//!
//! One versioned JSON value holds everything: goals, per-day metrics, the
//! chore/food/tracker catalogs with their per-day logs, the workout log,
//! assigned stickers, and the derived streak counters. The document is
//! loaded wholesale, mutated in memory, and rewritten wholesale; the core
//! never performs I/O itself (see [`crate::store`]).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::parse_date_key;
use crate::chore::{self, Chore};
use crate::nutrition::{self, FoodItem};
use crate::progress::{completed_trackers_count, day_progress, DayMetrics, DayProgress, Goals};
use crate::sticker::Sticker;
use crate::streak::{self, StreakState};
use crate::tracker::{self, MonthTracker};
use crate::workout::WorkoutType;

/// Current schema version of the persisted document.
pub const STATE_VERSION: u32 = 1;

// An absent version tag must read as a mismatch, not as current.
fn missing_version() -> u32 {
    0
}

/// Day progress before and after a metrics update.
///
/// The screens derive transition messages from this pair (water closed,
/// sleep closed, day closed) instead of the core choosing wording.
#[derive(Debug, Clone, Copy)]
pub struct ProgressTransition {
    pub before: DayProgress,
    pub after: DayProgress,
}

/// The whole persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    #[serde(default = "missing_version")]
    pub version: u32,
    pub goals: Goals,
    pub metrics_by_date: BTreeMap<String, DayMetrics>,
    pub food_items: Vec<FoodItem>,
    pub food_log_by_date: BTreeMap<String, Vec<String>>,
    pub chores: Vec<Chore>,
    pub chore_log_by_date: BTreeMap<String, Vec<String>>,
    pub workout_log_by_date: BTreeMap<String, WorkoutType>,
    pub month_trackers: Vec<MonthTracker>,
    pub month_tracker_log_by_date: BTreeMap<String, Vec<String>>,
    pub stickers_by_date: BTreeMap<String, String>,
    pub streaks: StreakState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            goals: Goals::default(),
            metrics_by_date: BTreeMap::new(),
            food_items: Vec::new(),
            food_log_by_date: BTreeMap::new(),
            chores: Vec::new(),
            chore_log_by_date: BTreeMap::new(),
            workout_log_by_date: BTreeMap::new(),
            month_trackers: Vec::new(),
            month_tracker_log_by_date: BTreeMap::new(),
            stickers_by_date: BTreeMap::new(),
            streaks: StreakState::default(),
        }
    }
}

impl AppState {
    /// Decode a persisted document.
    ///
    /// A parse failure or a version mismatch resets to the default
    /// document; there is no partial migration.
    pub fn from_json(raw: &str) -> AppState {
        match serde_json::from_str::<AppState>(raw) {
            Ok(state) if state.version == STATE_VERSION => state.normalized(),
            _ => AppState::default(),
        }
    }

    /// Encode for persistence.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Re-apply invariants to a freshly deserialized document: chore
    /// schedules are renormalized, per-day entries under malformed date
    /// keys are dropped, and ids within a day are deduplicated.
    pub fn normalized(mut self) -> AppState {
        for chore in &mut self.chores {
            chore.schedule = chore.schedule.normalized();
        }
        normalize_log(&mut self.food_log_by_date);
        normalize_log(&mut self.chore_log_by_date);
        normalize_log(&mut self.month_tracker_log_by_date);
        self.metrics_by_date
            .retain(|key, _| parse_date_key(key).is_some());
        self.workout_log_by_date
            .retain(|key, _| parse_date_key(key).is_some());
        self.stickers_by_date
            .retain(|key, _| parse_date_key(key).is_some());
        self
    }

    /// Metrics logged for a date, empty when nothing was logged.
    pub fn metrics_for(&self, date_key: &str) -> DayMetrics {
        self.metrics_by_date
            .get(date_key)
            .cloned()
            .unwrap_or_default()
    }

    /// Merge newly logged values into a day's metrics and refresh the
    /// day's sticker. Returns the progress before and after, or `None`
    /// when the date key is malformed (the document is left untouched).
    ///
    /// Streaks are not recalculated here; callers run
    /// [`AppState::recalculate_streaks`] once their batch of edits is done.
    pub fn upsert_metrics(&mut self, date_key: &str, patch: &DayMetrics) -> Option<ProgressTransition> {
        parse_date_key(date_key)?;

        let mut metrics = self.metrics_for(date_key);
        let before = day_progress(&metrics, &self.goals);
        if let Some(water_ml) = patch.water_ml {
            metrics.water_ml = Some(water_ml);
        }
        if let Some(steps) = patch.steps {
            metrics.steps = Some(steps);
        }
        if let Some(sleep_hours) = patch.sleep_hours {
            metrics.sleep_hours = Some(sleep_hours);
        }
        if let Some(workout_done) = patch.workout_done {
            metrics.workout_done = Some(workout_done);
        }
        let after = day_progress(&metrics, &self.goals);

        self.metrics_by_date.insert(date_key.to_string(), metrics);
        self.assign_sticker(date_key);

        Some(ProgressTransition { before, after })
    }

    /// Refresh the day's sticker from its completed-trackers count.
    pub fn assign_sticker(&mut self, date_key: &str) -> Sticker {
        let metrics = self.metrics_for(date_key);
        let sticker = Sticker::for_completed_count(completed_trackers_count(&metrics, &self.goals));
        self.stickers_by_date
            .insert(date_key.to_string(), sticker.id().to_string());
        sticker
    }

    /// Sticker recorded for a date, with legacy ids resolved.
    pub fn sticker_for(&self, date_key: &str) -> Option<Sticker> {
        self.stickers_by_date
            .get(date_key)
            .and_then(|id| Sticker::resolve(id))
    }

    /// Recompute the derived streak counters from the metrics history.
    pub fn recalculate_streaks(&mut self, reference: NaiveDate) -> StreakState {
        self.streaks = streak::recalculate(&self.metrics_by_date, &self.goals, reference);
        self.streaks
    }

    /// Toggle a chore's completion mark for a date, honoring the toggle
    /// eligibility rule. Returns the new marked state, or `None` when the
    /// toggle is not allowed or the chore/date is unknown.
    pub fn toggle_chore(&mut self, date_key: &str, chore_id: &str) -> Option<bool> {
        let date = parse_date_key(date_key)?;
        let chore = self.chores.iter().find(|chore| chore.id == chore_id)?;
        let marked = self
            .chore_log_by_date
            .get(date_key)
            .is_some_and(|ids| ids.iter().any(|id| id == chore_id));
        if !chore.can_toggle_on(date, marked) {
            return None;
        }
        Some(toggle_id(&mut self.chore_log_by_date, date_key, chore_id))
    }

    /// Toggle a logged food for a date. Returns the new logged state, or
    /// `None` when the food/date is unknown.
    pub fn toggle_food(&mut self, date_key: &str, food_id: &str) -> Option<bool> {
        parse_date_key(date_key)?;
        self.food_items.iter().find(|item| item.id == food_id)?;
        Some(toggle_id(&mut self.food_log_by_date, date_key, food_id))
    }

    /// Toggle a month tracker's mark for a date. Returns the new marked
    /// state, or `None` when the tracker/date is unknown.
    pub fn toggle_tracker(&mut self, date_key: &str, tracker_id: &str) -> Option<bool> {
        parse_date_key(date_key)?;
        self.month_trackers
            .iter()
            .find(|tracker| tracker.id == tracker_id)?;
        Some(toggle_id(
            &mut self.month_tracker_log_by_date,
            date_key,
            tracker_id,
        ))
    }

    /// Record (or clear, with `None`) the workout for a date. Returns
    /// false when the date key is malformed.
    pub fn set_workout(&mut self, date_key: &str, workout: Option<WorkoutType>) -> bool {
        if parse_date_key(date_key).is_none() {
            return false;
        }
        match workout {
            Some(kind) => {
                self.workout_log_by_date.insert(date_key.to_string(), kind);
            }
            None => {
                self.workout_log_by_date.remove(date_key);
            }
        }
        true
    }

    /// Delete a chore and strip it from the completion log.
    pub fn remove_chore(&mut self, chore_id: &str) -> bool {
        let before = self.chores.len();
        self.chores.retain(|chore| chore.id != chore_id);
        if self.chores.len() == before {
            return false;
        }
        chore::remove_chore_from_log(&mut self.chore_log_by_date, chore_id);
        true
    }

    /// Delete a food item and strip it from the food log.
    pub fn remove_food_item(&mut self, food_id: &str) -> bool {
        let before = self.food_items.len();
        self.food_items.retain(|item| item.id != food_id);
        if self.food_items.len() == before {
            return false;
        }
        nutrition::remove_food_from_log(&mut self.food_log_by_date, food_id);
        true
    }

    /// Delete a month tracker and strip it from its log.
    pub fn remove_month_tracker(&mut self, tracker_id: &str) -> bool {
        let before = self.month_trackers.len();
        self.month_trackers.retain(|tracker| tracker.id != tracker_id);
        if self.month_trackers.len() == before {
            return false;
        }
        tracker::remove_tracker_from_log(&mut self.month_tracker_log_by_date, tracker_id);
        true
    }
}

fn normalize_log(log: &mut BTreeMap<String, Vec<String>>) {
    log.retain(|key, _| parse_date_key(key).is_some());
    for ids in log.values_mut() {
        let mut seen = Vec::with_capacity(ids.len());
        ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(id.clone());
                true
            }
        });
    }
    log.retain(|_, ids| !ids.is_empty());
}

/// Set-semantics toggle of `id` in the per-day list. Returns true when the
/// id is present after the toggle.
fn toggle_id(log: &mut BTreeMap<String, Vec<String>>, date_key: &str, id: &str) -> bool {
    let ids = log.entry(date_key.to_string()).or_default();
    if let Some(position) = ids.iter().position(|existing| existing == id) {
        ids.remove(position);
        if ids.is_empty() {
            log.remove(date_key);
        }
        false
    } else {
        ids.push(id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chore::Schedule;

    fn date(key: &str) -> NaiveDate {
        parse_date_key(key).unwrap()
    }

    fn state_with_chore(schedule: Schedule, starts_on: Option<&str>) -> AppState {
        AppState {
            chores: vec![Chore {
                id: "chore-1".to_string(),
                title: "Vacuum".to_string(),
                schedule,
                starts_on: starts_on.map(str::to_string),
                is_active: true,
            }],
            ..AppState::default()
        }
    }

    #[test]
    fn test_default_document_shape() {
        let json = serde_json::to_value(AppState::default()).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["goals"]["waterMl"], 2000.0);
        assert_eq!(json["goals"]["steps"], 10_000.0);
        assert_eq!(json["goals"]["sleepHours"], 7.0);
        assert!(json["metricsByDate"].as_object().unwrap().is_empty());
        assert_eq!(json["streaks"]["currentDays"], 0);
        assert_eq!(json["streaks"]["bestDays"], 0);
    }

    #[test]
    fn test_from_json_round_trips_current_version() {
        let mut state = AppState::default();
        state
            .metrics_by_date
            .insert("2024-01-01".to_string(), DayMetrics {
                water_ml: Some(2000.0),
                ..DayMetrics::default()
            });
        let decoded = AppState::from_json(&state.to_json().unwrap());
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_from_json_resets_on_version_mismatch() {
        let raw = r#"{"version":2,"goals":{"waterMl":1,"steps":1,"sleepHours":1}}"#;
        assert_eq!(AppState::from_json(raw), AppState::default());
    }

    #[test]
    fn test_from_json_resets_on_missing_version() {
        assert_eq!(AppState::from_json(r#"{"goals":{}}"#), AppState::default());
    }

    #[test]
    fn test_from_json_resets_on_garbage() {
        assert_eq!(AppState::from_json("not json"), AppState::default());
        assert_eq!(AppState::from_json(""), AppState::default());
    }

    #[test]
    fn test_from_json_fills_missing_sections_with_defaults() {
        let raw = r#"{"version":1,"goals":{"waterMl":1500,"steps":8000,"sleepHours":8}}"#;
        let state = AppState::from_json(raw);
        assert_eq!(state.goals.water_ml, 1500.0);
        assert!(state.chores.is_empty());
        assert_eq!(state.streaks, StreakState::default());
    }

    #[test]
    fn test_normalized_drops_malformed_keys_and_dupes() {
        let raw = r#"{
            "version": 1,
            "metricsByDate": {"2024-01-01": {"waterMl": 100}, "2024-02-30": {"waterMl": 50}},
            "choreLogByDate": {"2024-01-01": ["a", "a", "b"], "bogus": ["a"], "2024-01-02": []},
            "chores": [{"id": "a", "title": "A", "schedule": {"type": "weekly", "weekdays": [3, 1, 1]}, "isActive": true}]
        }"#;
        let state = AppState::from_json(raw);
        assert!(state.metrics_by_date.contains_key("2024-01-01"));
        assert!(!state.metrics_by_date.contains_key("2024-02-30"));
        assert_eq!(
            state.chore_log_by_date.get("2024-01-01"),
            Some(&vec!["a".to_string(), "b".to_string()])
        );
        assert!(!state.chore_log_by_date.contains_key("bogus"));
        assert!(!state.chore_log_by_date.contains_key("2024-01-02"));
        assert_eq!(
            state.chores[0].schedule,
            Schedule::Weekly {
                weekdays: vec![1, 3]
            }
        );
    }

    #[test]
    fn test_upsert_metrics_assigns_sticker_and_reports_transition() {
        let mut state = AppState::default();
        let transition = state
            .upsert_metrics(
                "2024-01-01",
                &DayMetrics {
                    water_ml: Some(2000.0),
                    sleep_hours: Some(7.0),
                    ..DayMetrics::default()
                },
            )
            .unwrap();

        assert!(!transition.before.day_closed);
        assert!(transition.after.day_closed);
        assert_eq!(state.sticker_for("2024-01-01"), Some(Sticker::Middle));

        // Later edits merge instead of replacing
        state
            .upsert_metrics(
                "2024-01-01",
                &DayMetrics {
                    steps: Some(12_000.0),
                    workout_done: Some(true),
                    ..DayMetrics::default()
                },
            )
            .unwrap();
        let metrics = state.metrics_for("2024-01-01");
        assert_eq!(metrics.water_ml, Some(2000.0));
        assert_eq!(metrics.steps, Some(12_000.0));
        assert_eq!(state.sticker_for("2024-01-01"), Some(Sticker::Done));
    }

    #[test]
    fn test_upsert_metrics_rejects_malformed_key() {
        let mut state = AppState::default();
        assert!(state.upsert_metrics("2024-2-1", &DayMetrics::default()).is_none());
        assert!(state.metrics_by_date.is_empty());
        assert!(state.stickers_by_date.is_empty());
    }

    #[test]
    fn test_recalculate_streaks_updates_document() {
        let mut state = AppState::default();
        for key in ["2024-01-01", "2024-01-02"] {
            state
                .upsert_metrics(
                    key,
                    &DayMetrics {
                        water_ml: Some(2000.0),
                        sleep_hours: Some(7.0),
                        ..DayMetrics::default()
                    },
                )
                .unwrap();
        }
        let streaks = state.recalculate_streaks(date("2024-01-02"));
        assert_eq!(streaks.current_days, 2);
        assert_eq!(state.streaks.best_days, 2);
    }

    #[test]
    fn test_toggle_chore_respects_eligibility() {
        // Weekly on Monday, anchored to the week of 2024-01-01
        let mut state = state_with_chore(
            Schedule::from_weekdays(&[1]),
            Some("2024-01-01"),
        );

        // Planned Monday toggles on and off
        assert_eq!(state.toggle_chore("2024-01-01", "chore-1"), Some(true));
        assert_eq!(state.toggle_chore("2024-01-01", "chore-1"), Some(false));
        assert!(!state.chore_log_by_date.contains_key("2024-01-01"));

        // Monday of another week is out of scope
        assert_eq!(state.toggle_chore("2024-01-08", "chore-1"), None);

        // An existing mark on an out-of-scope date can still be cleared
        state
            .chore_log_by_date
            .insert("2024-01-08".to_string(), vec!["chore-1".to_string()]);
        assert_eq!(state.toggle_chore("2024-01-08", "chore-1"), Some(false));
    }

    #[test]
    fn test_toggle_chore_unknown_ids() {
        let mut state = state_with_chore(Schedule::None, None);
        assert_eq!(state.toggle_chore("2024-01-01", "ghost"), None);
        assert_eq!(state.toggle_chore("bogus", "chore-1"), None);
        // Unscheduled chores toggle anywhere
        assert_eq!(state.toggle_chore("2024-01-01", "chore-1"), Some(true));
    }

    #[test]
    fn test_toggle_food_requires_catalog_entry() {
        let mut state = AppState::default();
        assert_eq!(state.toggle_food("2024-01-01", "oats"), None);

        state.food_items.push(FoodItem {
            id: "oats".to_string(),
            title: "Овсянка".to_string(),
            kcal_per_serving: 350,
            color: "#f9a8d4".to_string(),
        });
        assert_eq!(state.toggle_food("2024-01-01", "oats"), Some(true));
        assert_eq!(state.toggle_food("2024-01-01", "oats"), Some(false));
    }

    #[test]
    fn test_set_workout_and_clear() {
        let mut state = AppState::default();
        assert!(state.set_workout("2024-01-01", Some(WorkoutType::Gym)));
        assert_eq!(
            state.workout_log_by_date.get("2024-01-01"),
            Some(&WorkoutType::Gym)
        );
        assert!(state.set_workout("2024-01-01", None));
        assert!(!state.workout_log_by_date.contains_key("2024-01-01"));
        assert!(!state.set_workout("garbage", Some(WorkoutType::Gym)));
    }

    #[test]
    fn test_remove_chore_cleans_log() {
        let mut state = state_with_chore(Schedule::None, None);
        state.toggle_chore("2024-01-01", "chore-1");
        assert!(state.remove_chore("chore-1"));
        assert!(state.chores.is_empty());
        assert!(state.chore_log_by_date.is_empty());
        assert!(!state.remove_chore("chore-1"));
    }

    #[test]
    fn test_remove_food_cleans_log() {
        let mut state = AppState::default();
        state.food_items.push(FoodItem {
            id: "oats".to_string(),
            title: "Овсянка".to_string(),
            kcal_per_serving: 350,
            color: "#f9a8d4".to_string(),
        });
        state.toggle_food("2024-01-01", "oats");
        assert!(state.remove_food_item("oats"));
        assert!(state.food_log_by_date.is_empty());
    }

    #[test]
    fn test_remove_tracker_cleans_log() {
        let mut state = AppState::default();
        state.month_trackers.push(MonthTracker {
            id: "read".to_string(),
            title: "Чтение".to_string(),
            color: crate::tracker::TrackerColor::Mint,
        });
        state.toggle_tracker("2024-01-05", "read");
        assert!(state.remove_month_tracker("read"));
        assert!(state.month_tracker_log_by_date.is_empty());
    }

    #[test]
    fn test_legacy_sticker_resolution_at_read() {
        let mut state = AppState::default();
        state
            .stickers_by_date
            .insert("2024-01-01".to_string(), "pink-star".to_string());
        state
            .stickers_by_date
            .insert("2024-01-02".to_string(), "xyz".to_string());
        assert_eq!(state.sticker_for("2024-01-01"), Some(Sticker::Middle));
        assert_eq!(state.sticker_for("2024-01-02"), None);
        assert_eq!(state.sticker_for("2024-01-03"), None);
    }
}
