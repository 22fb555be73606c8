//! Reward sticker selection.
//!
//! A day earns one of three stickers based on how many trackers it closed.
//! Earlier releases shipped a larger granular set; those ids collapse
//! many-to-one into the current set through a fixed alias table consulted
//! only here, at the normalization boundary.

use serde::{Deserialize, Serialize};

/// Reward sticker for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sticker {
    /// All four trackers closed
    Done,
    /// Partial progress, one to three trackers
    Middle,
    /// Nothing closed yet
    Low,
}

/// Legacy sticker ids from earlier releases.
const LEGACY_ALIASES: &[(&str, Sticker)] = &[
    ("spark-heart", Sticker::Done),
    ("pink-star", Sticker::Middle),
    ("strawberry", Sticker::Middle),
    ("tulip", Sticker::Middle),
    ("cool_man", Sticker::Middle),
    ("shy", Sticker::Middle),
    ("help", Sticker::Low),
];

impl Sticker {
    /// Select the sticker for a completed-trackers count.
    pub fn for_completed_count(count: u32) -> Sticker {
        if count >= 4 {
            Sticker::Done
        } else if count == 0 {
            Sticker::Low
        } else {
            Sticker::Middle
        }
    }

    /// Resolve a persisted sticker id.
    ///
    /// Current ids resolve directly; legacy ids map through the alias
    /// table; anything else resolves to `None`, never an error.
    pub fn resolve(id: &str) -> Option<Sticker> {
        match id {
            "done" => Some(Sticker::Done),
            "middle" => Some(Sticker::Middle),
            "low" => Some(Sticker::Low),
            other => LEGACY_ALIASES
                .iter()
                .find(|(legacy, _)| *legacy == other)
                .map(|(_, sticker)| *sticker),
        }
    }

    /// Stable id used in the persisted document.
    pub fn id(&self) -> &'static str {
        match self {
            Sticker::Done => "done",
            Sticker::Middle => "middle",
            Sticker::Low => "low",
        }
    }

    /// Motivational phrase shown next to the sticker.
    pub fn phrase(&self) -> &'static str {
        match self {
            Sticker::Done => "Все трекеры закрыты. Идеальный день.",
            Sticker::Middle => "Хороший прогресс. Осталось немного.",
            Sticker::Low => "Начни с одного шага. Все получится.",
        }
    }
}
