//! CLI command modules, one per screen of the app.

pub mod chores;
pub mod goals;
pub mod month;
pub mod nutrition;
pub mod today;
pub mod workouts;

use petal_core::calendar;
use petal_core::{AppState, StateStore};

/// Open the store and load the current document.
pub(crate) fn load() -> Result<(StateStore, AppState), Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    let state = store.load();
    Ok((store, state))
}

/// Persist after a mutation. A failed write is ignored: the in-memory
/// state stays authoritative for this invocation's output.
pub(crate) fn persist(store: &StateStore, state: &AppState) {
    let _ = store.save(state);
}

/// Resolve an optional `--date` argument, defaulting to today.
pub(crate) fn resolve_date_key(
    date: Option<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    match date {
        Some(key) => {
            if calendar::parse_date_key(&key).is_none() {
                return Err(format!("invalid date key '{key}' (expected YYYY-MM-DD)").into());
            }
            Ok(key)
        }
        None => Ok(calendar::format_date_key(calendar::today())),
    }
}
