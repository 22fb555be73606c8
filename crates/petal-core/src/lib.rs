//! # Petal Core Library
//!
//! This library provides the core business logic for Petal, a personal
//! habit and wellness tracker. It implements a CLI-first philosophy where
//! all operations are available via a standalone CLI binary that is a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **State document**: one versioned JSON value holding goals, per-day
//!   metrics and logs, catalogs, stickers, and derived streaks; mutated in
//!   memory and rewritten wholesale by the store
//! - **Evaluators**: pure functions deriving day progress, streaks, and
//!   stickers from the document; the core never performs I/O itself
//! - **Storage**: JSON state file under `~/.config/petal/`
//!
//! ## Key Components
//!
//! - [`AppState`]: the persisted document and its screen-level mutations
//! - [`day_progress`]: closed/open verdict for one day's metrics
//! - [`streak::recalculate`]: best and current consecutive-day runs
//! - [`Sticker`]: reward selection and legacy-id normalization
//! - [`Chore`]: weekly recurrence and completion-toggle eligibility
//! - [`StateStore`]: load/save collaborator over the state file

pub mod calendar;
pub mod chore;
pub mod error;
pub mod nutrition;
pub mod progress;
pub mod state;
pub mod sticker;
pub mod store;
pub mod streak;
pub mod tracker;
pub mod workout;

pub use calendar::WeekDate;
pub use chore::{Chore, Schedule};
pub use error::StoreError;
pub use nutrition::FoodItem;
pub use progress::{day_progress, DayMetrics, DayProgress, Goals, SleepBand};
pub use state::{AppState, ProgressTransition, STATE_VERSION};
pub use sticker::Sticker;
pub use store::StateStore;
pub use streak::{StreakBadge, StreakState};
pub use tracker::{MonthTracker, TrackerColor};
pub use workout::WorkoutType;
