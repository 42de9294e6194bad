//! Karabiner-Elements rule generation for Razer Naga side buttons
//!
//! Compiles a button → action mapping table into complex-modification rules
//! and splices them into karabiner.json, replacing rules from earlier runs.

pub mod action;
pub mod error;
pub mod keys;
pub mod rules;
pub mod splice;

pub use action::{Action, ActionRecord};
pub use error::{ParseActionError, SpliceError};
pub use rules::{compile, is_managed_rule, MappingTable, Rule, SUPPORTED_VENDOR_IDS};
pub use splice::{splice_file, splice_rules, SpliceOutcome};
