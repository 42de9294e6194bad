//! Persistent button mapping table.
//!
//! The table lives in memory and is written to a small JSON file after every
//! change. Its on-disk format is private to this tool:
//!
//! ```json
//! { "1": [{ "id": "…", "type": "keystroke", "key": "left", "modifiers": ["cmd"] }] }
//! ```

use naga_karabiner::{Action, ActionRecord, MappingTable};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Number of buttons on the Naga side grid.
pub const GRID_BUTTONS: u8 = 12;

/// Errors from loading, saving or editing the mapping table
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not read mappings from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt mappings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Could not serialize mappings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not write mappings to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Button {button} has no action #{position}")]
    NoSuchAction { button: String, position: usize },
}

/// In-memory button → actions table with explicit load/save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingStore {
    table: MappingTable,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: MappingTable) -> Self {
        Self { table }
    }

    /// Load the table from `path`. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!("No mappings file at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table: MappingTable =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { table })
    }

    /// Write the table to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.table)?;
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)?;
        debug!("Saved mappings to {}", path.display());
        Ok(())
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Button ids present in the table, including ones with no actions.
    pub fn buttons(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Actions bound to `button` (empty if unmapped).
    pub fn actions(&self, button: &str) -> &[ActionRecord] {
        self.table.get(button).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append an action to `button`.
    pub fn push(&mut self, button: &str, action: Action) -> &ActionRecord {
        let actions = self.table.entry(button.to_string()).or_default();
        actions.push(ActionRecord::new(action));
        &actions[actions.len() - 1]
    }

    /// Remove the action at `index` (0-based) from `button`.
    pub fn remove(&mut self, button: &str, index: usize) -> Result<ActionRecord, StoreError> {
        match self.table.get_mut(button) {
            Some(actions) if index < actions.len() => Ok(actions.remove(index)),
            _ => Err(StoreError::NoSuchAction {
                button: button.to_string(),
                position: index + 1,
            }),
        }
    }

    /// Drop every action bound to `button`.
    pub fn clear(&mut self, button: &str) {
        self.table.insert(button.to_string(), Vec::new());
    }

    /// Drop every mapping.
    pub fn reset(&mut self) {
        self.table.clear();
    }

    /// One-line description of a button for grid views.
    ///
    /// `Unmapped` when empty, otherwise the first action with `...` appended
    /// if more follow.
    pub fn summary(&self, button: &str) -> String {
        match self.actions(button) {
            [] => "Unmapped".to_string(),
            [only] => only.to_string(),
            [first, ..] => format!("{first}..."),
        }
    }
}
