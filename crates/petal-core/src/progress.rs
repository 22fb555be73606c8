//! Day progress evaluation.
//!
//! A day's logged metrics are compared against the user's goals to decide
//! which trackers are closed and whether the day as a whole counts as
//! closed. Thresholds are inclusive. A goal of zero disables its metric:
//! it never reads as closed and drops out of both tallies, so the `0 >= 0`
//! accident cannot close every day.

use serde::{Deserialize, Serialize};

/// Process-wide goal thresholds, applied uniformly to all dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Goals {
    /// Daily water target in milliliters
    pub water_ml: f64,
    /// Daily step target
    pub steps: f64,
    /// Daily sleep target in hours
    pub sleep_hours: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            water_ml: 2000.0,
            steps: 10_000.0,
            sleep_hours: 7.0,
        }
    }
}

/// Metrics logged for one day.
///
/// An absent field means "not logged", which is distinct from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_ml: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_done: Option<bool>,
}

impl DayMetrics {
    /// Whether nothing has been logged for the day.
    pub fn is_empty(&self) -> bool {
        *self == DayMetrics::default()
    }
}

/// Closed/open verdict for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProgress {
    pub water_closed: bool,
    pub sleep_closed: bool,
    pub steps_closed: bool,
    pub workout_closed: bool,
    /// Closed count among water, sleep and steps
    pub core_closed_count: u32,
    /// Closed count across all four trackers
    pub closed_count: u32,
    /// True once at least two of the three core trackers hit goal
    pub day_closed: bool,
}

/// Sleep classification used by the month view's circular tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepBand {
    None,
    Low,
    Medium,
    High,
}

fn goal_met(value: Option<f64>, goal: f64) -> bool {
    goal > 0.0 && value.unwrap_or(0.0) >= goal
}

/// Evaluate one day's metrics against the goals.
///
/// A day with no metrics at all is all-false. Workout participates in
/// `closed_count` but not in `core_closed_count`, and never affects
/// `day_closed`: the day closes on core trackers alone.
pub fn day_progress(metrics: &DayMetrics, goals: &Goals) -> DayProgress {
    let water_closed = goal_met(metrics.water_ml, goals.water_ml);
    let sleep_closed = goal_met(metrics.sleep_hours, goals.sleep_hours);
    let steps_closed = goal_met(metrics.steps, goals.steps);
    let workout_closed = metrics.workout_done == Some(true);

    let core_closed_count = [water_closed, sleep_closed, steps_closed]
        .into_iter()
        .filter(|closed| *closed)
        .count() as u32;
    let closed_count = core_closed_count + u32::from(workout_closed);

    DayProgress {
        water_closed,
        sleep_closed,
        steps_closed,
        workout_closed,
        core_closed_count,
        closed_count,
        day_closed: core_closed_count >= 2,
    }
}

/// The all-four closed count the sticker assignment keys off.
pub fn completed_trackers_count(metrics: &DayMetrics, goals: &Goals) -> u32 {
    day_progress(metrics, goals).closed_count
}

/// Classify a day's sleep hours into the month-view bands.
pub fn sleep_band(metrics: &DayMetrics) -> SleepBand {
    let hours = metrics.sleep_hours.unwrap_or(0.0);
    if hours >= 9.0 {
        SleepBand::High
    } else if hours >= 6.0 {
        SleepBand::Medium
    } else if hours >= 3.0 {
        SleepBand::Low
    } else {
        SleepBand::None
    }
}
