//! File-backed storage for the state document.
//!
//! The document lives as one JSON file that is read wholesale at load and
//! replaced wholesale at save; there is no partial-write protocol and no
//! locking. A load that fails for any reason falls back to the default
//! document, and callers are free to ignore a failed save: the in-memory
//! state stays authoritative for the rest of the session.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::state::AppState;

/// Returns `~/.config/petal[-dev]/` based on PETAL_ENV.
///
/// Set PETAL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PETAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("petal-dev")
    } else {
        base_dir.join("petal")
    };

    fs::create_dir_all(&dir).map_err(|source| StoreError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Load/save pair over the persisted state document.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store at the default platform location.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn open() -> Result<StateStore> {
        Ok(StateStore {
            path: data_dir()?.join("state.json"),
        })
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> StateStore {
        StateStore { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state document.
    ///
    /// A missing or unreadable file, a parse failure, and a schema version
    /// mismatch all reset to the default document rather than attempting a
    /// partial migration.
    pub fn load(&self) -> AppState {
        match fs::read_to_string(&self.path) {
            Ok(raw) => AppState::from_json(&raw),
            Err(_) => AppState::default(),
        }
    }

    /// Persist the state document, replacing the file wholesale.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails. Callers that
    /// prefer availability over durability may ignore it.
    pub fn save(&self, state: &AppState) -> Result<()> {
        let json = state.to_json()?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
