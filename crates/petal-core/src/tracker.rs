//! Month trackers marked per day.
//!
//! Trackers are user-defined habits shown on the month view (reading,
//! stretching, a work-day mark). Each carries a color from a small fixed
//! palette; the per-day log stores tracker ids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Palette color for a month tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerColor {
    Green,
    Mint,
    Sky,
    Amber,
    Rose,
}

impl TrackerColor {
    /// All palette colors, in display order.
    pub const ALL: [TrackerColor; 5] = [
        TrackerColor::Green,
        TrackerColor::Mint,
        TrackerColor::Sky,
        TrackerColor::Amber,
        TrackerColor::Rose,
    ];

    /// Stable id used in the persisted document.
    pub fn id(&self) -> &'static str {
        match self {
            TrackerColor::Green => "green",
            TrackerColor::Mint => "mint",
            TrackerColor::Sky => "sky",
            TrackerColor::Amber => "amber",
            TrackerColor::Rose => "rose",
        }
    }

    /// Parse a persisted or user-supplied id.
    pub fn from_id(id: &str) -> Option<TrackerColor> {
        TrackerColor::ALL.into_iter().find(|color| color.id() == id)
    }
}

/// A user-defined month tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTracker {
    pub id: String,
    pub title: String,
    pub color: TrackerColor,
}

/// Days among `month_keys` on which the tracker is marked.
pub fn monthly_count(
    log: &BTreeMap<String, Vec<String>>,
    tracker_id: &str,
    month_keys: &[String],
) -> u32 {
    month_keys
        .iter()
        .filter(|key| {
            log.get(key.as_str())
                .is_some_and(|ids| ids.iter().any(|id| id == tracker_id))
        })
        .count() as u32
}

/// Strip a deleted tracker from every day of the log.
pub fn remove_tracker_from_log(log: &mut BTreeMap<String, Vec<String>>, tracker_id: &str) {
    for ids in log.values_mut() {
        ids.retain(|id| id != tracker_id);
    }
    log.retain(|_, ids| !ids.is_empty());
}
