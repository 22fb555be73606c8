//! Recurring chores and the weekly recurrence resolver.
//!
//! A chore either has no schedule (relevant only through explicit per-day
//! completion) or recurs weekly on a set of weekdays. A weekly chore may
//! additionally be anchored to one specific Monday-start week via
//! `starts_on`, which models a plan created for that week alone rather
//! than an indefinite recurrence.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{format_date_key, week_start};

/// Recurrence schedule for a chore.
///
/// Weekday values use the document's 0 = Sunday .. 6 = Saturday convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schedule {
    None,
    Weekly { weekdays: Vec<u8> },
}

impl Schedule {
    /// Build a schedule from raw weekday picks.
    ///
    /// Out-of-range values are dropped, the rest deduplicated and sorted.
    /// An empty set is equivalent to no schedule at all.
    pub fn from_weekdays(weekdays: &[u8]) -> Schedule {
        let mut days: Vec<u8> = weekdays.iter().copied().filter(|day| *day <= 6).collect();
        days.sort_unstable();
        days.dedup();
        if days.is_empty() {
            Schedule::None
        } else {
            Schedule::Weekly { weekdays: days }
        }
    }

    /// Re-apply the construction invariants to a deserialized schedule.
    pub fn normalized(&self) -> Schedule {
        match self {
            Schedule::None => Schedule::None,
            Schedule::Weekly { weekdays } => Schedule::from_weekdays(weekdays),
        }
    }
}

/// A recurring household task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: String,
    pub title: String,
    pub schedule: Schedule,
    /// Monday date key of the one week this chore is planned for.
    /// Absent means the schedule recurs indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<String>,
    pub is_active: bool,
}

impl Chore {
    /// Whether recurrence plans this chore on `date`.
    pub fn is_planned_on(&self, date: NaiveDate) -> bool {
        match &self.schedule {
            Schedule::None => false,
            Schedule::Weekly { weekdays } => {
                let weekday = date.weekday().num_days_from_sunday() as u8;
                if !weekdays.contains(&weekday) {
                    return false;
                }
                match &self.starts_on {
                    Some(anchor) => *anchor == format_date_key(week_start(date)),
                    None => true,
                }
            }
        }
    }

    /// Whether a completion mark may be toggled on `date`.
    ///
    /// Eligible when the date is planned, when a mark already exists there,
    /// or when the schedule is `None`. Existing marks stay toggleable after
    /// a schedule edit, while fresh marks on out-of-scope dates are
    /// blocked.
    pub fn can_toggle_on(&self, date: NaiveDate, already_marked: bool) -> bool {
        already_marked || self.schedule == Schedule::None || self.is_planned_on(date)
    }
}

/// Chores relevant for one day, in catalog order: active chores that are
/// planned on the date, already completed that day, or unscheduled.
pub fn planned_chore_ids(
    chores: &[Chore],
    date: NaiveDate,
    completed_today: &[String],
) -> Vec<String> {
    chores
        .iter()
        .filter(|chore| chore.is_active)
        .filter(|chore| match chore.schedule {
            Schedule::None => true,
            Schedule::Weekly { .. } => {
                chore.is_planned_on(date) || completed_today.contains(&chore.id)
            }
        })
        .map(|chore| chore.id.clone())
        .collect()
}

/// Strip a deleted chore from every day of the completion log.
pub fn remove_chore_from_log(log: &mut BTreeMap<String, Vec<String>>, chore_id: &str) {
    for ids in log.values_mut() {
        ids.retain(|id| id != chore_id);
    }
    log.retain(|_, ids| !ids.is_empty());
}
