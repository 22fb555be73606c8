//! Streak computation over the daily metrics history.
//!
//! A streak is a maximal run of consecutive closed days. The whole history
//! is rescanned on every recalculation; the counters are derived state and
//! are never authored directly.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{date_diff_in_days, format_date_key, parse_date_key};
use crate::progress::{day_progress, DayMetrics, Goals};

/// Derived streak counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakState {
    /// Consecutive closed days ending at the reference date
    pub current_days: u32,
    /// Longest run of consecutive closed days in the history
    pub best_days: u32,
}

/// Badge tier for a streak length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakBadge {
    Newbie,
    Rhythm,
    Stable,
    Fire,
}

impl StreakBadge {
    /// Badge for a streak of `days` consecutive closed days.
    pub fn for_days(days: u32) -> StreakBadge {
        if days >= 14 {
            StreakBadge::Fire
        } else if days >= 7 {
            StreakBadge::Stable
        } else if days >= 3 {
            StreakBadge::Rhythm
        } else {
            StreakBadge::Newbie
        }
    }

    /// Display title for the badge.
    pub fn title(&self) -> &'static str {
        match self {
            StreakBadge::Newbie => "Новичок",
            StreakBadge::Rhythm => "В ритме",
            StreakBadge::Stable => "Стабильно",
            StreakBadge::Fire => "Огонь",
        }
    }
}

/// Recalculate streaks from the full metrics history.
///
/// Every date in the history is evaluated against the goals; the set of
/// closed dates is scanned ascending for the best run, and the current run
/// walks backward from `reference` (inclusive) until the first gap. Keys
/// that fail to parse are skipped, never abort the computation.
///
/// `best_days` is clamped up to `current_days` at the end, so the invariant
/// `best_days >= current_days` holds even when the run ending at the
/// reference date is the longest one.
pub fn recalculate(
    metrics_by_date: &BTreeMap<String, DayMetrics>,
    goals: &Goals,
    reference: NaiveDate,
) -> StreakState {
    // BTreeSet iterates ascending, and the fixed-width zero-padded key
    // format makes lexicographic order equal calendar order.
    let closed: BTreeSet<&str> = metrics_by_date
        .iter()
        .filter(|(key, metrics)| {
            parse_date_key(key).is_some() && day_progress(metrics, goals).day_closed
        })
        .map(|(key, _)| key.as_str())
        .collect();

    let mut best_days = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for key in &closed {
        let Some(date) = parse_date_key(key) else {
            continue;
        };
        run = match previous {
            Some(prev) if date_diff_in_days(date, prev) == 1 => run + 1,
            _ => 1,
        };
        best_days = best_days.max(run);
        previous = Some(date);
    }

    let mut current_days = 0u32;
    let mut cursor = reference;
    while closed.contains(format_date_key(cursor).as_str()) {
        current_days += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }

    StreakState {
        current_days,
        best_days: best_days.max(current_days),
    }
}
