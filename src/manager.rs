//! Save pipeline: mapping store → rules → karabiner.json.
//!
//! Every change is saved immediately. A save persists the mapping table,
//! compiles it and splices the result into Karabiner's config. Failures are
//! logged and reported in the returned [`SaveReport`], never propagated: the
//! mapping table is kept even when the Karabiner file cannot be updated.

use crate::config::AppConfig;
use crate::store::{MappingStore, StoreError};
use naga_karabiner::{compile, splice_file, Action, ActionRecord, Rule, SpliceError, SpliceOutcome};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// What a save managed to do.
#[derive(Debug)]
pub struct SaveReport {
    /// Result of writing the mapping table.
    pub stored: Result<(), StoreError>,
    /// Number of rules compiled from the table.
    pub rules: usize,
    /// Result of splicing the rules into karabiner.json.
    pub splice: Result<SpliceOutcome, SpliceError>,
}

impl SaveReport {
    /// True when both the mapping table and karabiner.json were written.
    pub fn is_complete(&self) -> bool {
        self.stored.is_ok() && matches!(self.splice, Ok(SpliceOutcome::Spliced { .. }))
    }
}

/// Owns the mapping table and knows where to save it.
pub struct ConfigManager {
    store: MappingStore,
    mappings_file: PathBuf,
    karabiner_config: PathBuf,
}

impl ConfigManager {
    /// Open the mapping table named in `config`.
    ///
    /// A missing mappings file is an empty table. An unreadable or corrupt
    /// one is an error, so the next save can never overwrite it.
    pub fn open(config: &AppConfig) -> Result<Self, StoreError> {
        let store = MappingStore::load(&config.mappings_file)?;
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: MappingStore, config: &AppConfig) -> Self {
        Self {
            store,
            mappings_file: config.mappings_file.clone(),
            karabiner_config: config.karabiner_config.clone(),
        }
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    pub fn karabiner_config(&self) -> &Path {
        &self.karabiner_config
    }

    pub fn mappings_file(&self) -> &Path {
        &self.mappings_file
    }

    /// Rules the current table compiles to.
    pub fn rules(&self) -> Vec<Rule> {
        compile(self.store.table())
    }

    /// Persist the table, compile it and splice the rules into karabiner.json.
    pub fn save(&self) -> SaveReport {
        let stored = self.store.save(&self.mappings_file);
        if let Err(e) = &stored {
            error!("{e}");
        }

        let rules = self.rules();
        let splice = splice_file(&self.karabiner_config, &rules);
        match &splice {
            Ok(SpliceOutcome::Spliced { .. }) => {}
            Ok(SpliceOutcome::NoProfiles) => warn!(
                "{} has no profiles; rules were not written",
                self.karabiner_config.display()
            ),
            Err(e) => error!("{e}"),
        }

        SaveReport {
            stored,
            rules: rules.len(),
            splice,
        }
    }

    /// Append an action to a button and save.
    pub fn add(&mut self, button: &str, action: Action) -> SaveReport {
        let record = self.store.push(button, action);
        info!("Button {button}: added {record}");
        self.save()
    }

    /// Remove the action at `index` (0-based) from a button and save.
    ///
    /// Nothing is saved when the action does not exist.
    pub fn delete(
        &mut self,
        button: &str,
        index: usize,
    ) -> Result<(ActionRecord, SaveReport), StoreError> {
        let removed = self.store.remove(button, index)?;
        info!("Button {button}: removed {removed}");
        Ok((removed, self.save()))
    }

    /// Drop every action on a button and save.
    pub fn clear(&mut self, button: &str) -> SaveReport {
        self.store.clear(button);
        info!("Button {button}: cleared");
        self.save()
    }

    /// Drop every mapping and save.
    pub fn reset(&mut self) -> SaveReport {
        self.store.reset();
        info!("All mappings cleared");
        self.save()
    }
}
