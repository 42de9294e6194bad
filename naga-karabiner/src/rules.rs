//! Karabiner-Elements complex-modification rules and the compiler that
//! builds them from a button mapping table.
//!
//! Each mapped button becomes one [`Rule`] with a single `basic`
//! manipulator:
//!
//! ```json
//! {
//!   "description": "Naga Button 1",
//!   "manipulators": [{
//!     "type": "basic",
//!     "from": { "key_code": "1", "modifiers": { "optional": ["any"] } },
//!     "to": [{ "key_code": "left_arrow", "modifiers": ["left_command"] }],
//!     "conditions": [{ "type": "device_if", "identifiers": [{ "vendor_id": 5426 }, ...] }]
//!   }]
//! }
//! ```

use crate::action::ActionRecord;
use crate::keys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Button id → actions, in the order they were recorded.
pub type MappingTable = BTreeMap<String, Vec<ActionRecord>>;

/// Description prefix of every rule this crate generates.
pub const RULE_PREFIX: &str = "Naga Button";

/// Description of the single combined rule written by early releases.
pub const LEGACY_RULE_DESCRIPTION: &str = "Naga Controller Rules";

/// Razer
pub const VENDOR_ID_RAZER: u32 = 5426;
/// Second Naga vendor id seen in the field
pub const VENDOR_ID_ALT: u32 = 5758;
/// Third Naga vendor id seen in the field
pub const VENDOR_ID_ALT2: u32 = 1678;

/// Vendors whose devices the generated rules apply to.
pub const SUPPORTED_VENDOR_IDS: &[u32] = &[VENDOR_ID_RAZER, VENDOR_ID_ALT, VENDOR_ID_ALT2];

/// One complex-modification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub description: String,
    pub manipulators: Vec<Manipulator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manipulator {
    #[serde(rename = "type", default = "default_manipulator_type")]
    pub kind: String,
    pub from: FromEvent,
    pub to: Vec<ToEvent>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

fn default_manipulator_type() -> String {
    "basic".to_string()
}

/// Trigger key. `modifiers.optional = ["any"]` lets the rule fire whatever
/// else is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromEvent {
    pub key_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<FromModifiers>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromModifiers {
    #[serde(default)]
    pub optional: Vec<String>,
}

impl FromModifiers {
    pub fn any() -> Self {
        Self {
            optional: vec!["any".to_string()],
        }
    }
}

/// Output event. `modifiers` is always written, empty when none are held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToEvent {
    pub key_code: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifiers: Vec<DeviceIdentifier>,
}

impl Condition {
    /// `device_if` restricted to [`SUPPORTED_VENDOR_IDS`].
    pub fn supported_devices() -> Self {
        Self {
            kind: "device_if".to_string(),
            identifiers: SUPPORTED_VENDOR_IDS
                .iter()
                .map(|&vendor_id| DeviceIdentifier::vendor(vendor_id))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_keyboard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mouse: Option<bool>,
}

impl DeviceIdentifier {
    pub fn vendor(vendor_id: u32) -> Self {
        Self {
            vendor_id: Some(vendor_id),
            ..Default::default()
        }
    }
}

/// Description used for a button's rule.
pub fn rule_description(button: &str) -> String {
    format!("{RULE_PREFIX} {button}")
}

/// Whether a rule description marks a rule as generated by this crate.
pub fn is_managed_description(description: &str) -> bool {
    description.starts_with(RULE_PREFIX) || description == LEGACY_RULE_DESCRIPTION
}

/// Whether a raw rule from karabiner.json was generated by this crate.
///
/// Rules without a string `description` are never ours.
pub fn is_managed_rule(rule: &serde_json::Value) -> bool {
    rule.get("description")
        .and_then(serde_json::Value::as_str)
        .is_some_and(is_managed_description)
}

/// Ordering key for button ids: numeric value, non-numeric ids sort as 0.
fn button_order(button: &str) -> i64 {
    button.parse().unwrap_or(0)
}

/// Compile a mapping table into rules.
///
/// Buttons are emitted in ascending numeric order (stable, so ties keep the
/// table's order). Records that are not keystrokes, or have no key, are
/// skipped; a button left with no output events produces no rule.
pub fn compile(table: &MappingTable) -> Vec<Rule> {
    let mut buttons: Vec<(&String, &Vec<ActionRecord>)> = table.iter().collect();
    buttons.sort_by_key(|(button, _)| button_order(button));

    buttons
        .into_iter()
        .filter_map(|(button, actions)| compile_button(button, actions))
        .collect()
}

/// Compile a single button's actions, or `None` if nothing compiles.
pub fn compile_button(button: &str, actions: &[ActionRecord]) -> Option<Rule> {
    let to: Vec<ToEvent> = actions
        .iter()
        .filter_map(|record| {
            let key = record.action.compiled_key()?;
            Some(ToEvent {
                key_code: keys::key_code(key).to_string(),
                modifiers: record
                    .action
                    .modifiers()
                    .iter()
                    .map(|m| keys::modifier_code(m).to_string())
                    .collect(),
            })
        })
        .collect();

    if to.is_empty() {
        debug!("Button {button}: no compilable actions, skipping");
        return None;
    }

    let from_key = keys::button_key(button);
    debug!("Button {button}: {} event(s) from key {from_key}", to.len());

    Some(Rule {
        description: rule_description(button),
        manipulators: vec![Manipulator {
            kind: default_manipulator_type(),
            from: FromEvent {
                key_code: from_key.to_string(),
                modifiers: Some(FromModifiers::any()),
            },
            to,
            conditions: vec![Condition::supported_devices()],
        }],
    })
}
