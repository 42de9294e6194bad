// Razer Naga side-button remapper - Shared Library
// Mapping storage, app config, key recording tables and the save pipeline

pub mod config;
pub mod manager;
pub mod recorder;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use manager::{ConfigManager, SaveReport};
pub use recorder::{key_for_scan_code, modifiers_for_key, modifiers_from_flags, RecordedKey};
pub use store::{MappingStore, StoreError, GRID_BUTTONS};
