//! Splice generated rules into karabiner.json.
//!
//! The document is handled as an untyped [`serde_json::Value`] so everything
//! this crate does not own (other profiles, devices, parameters, rules from
//! other tools) is carried through untouched. With `preserve_order` enabled
//! object keys keep their on-disk order.
//!
//! Only the active profile is edited: the first one with `"selected": true`,
//! or the first profile when none is selected. Within it, every rule matching
//! [`is_managed_rule`] is dropped and the new rules are appended, so writing
//! the same rules twice leaves the same document.

use crate::error::SpliceError;
use crate::rules::{is_managed_rule, Rule};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

/// Result of a splice that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// `profiles` is missing, not a list, empty, or its target entry is not
    /// an object. Nothing was changed or written.
    NoProfiles,
    /// Rules were replaced in `profiles[profile_index]`.
    Spliced {
        profile_index: usize,
        removed: usize,
        added: usize,
    },
}

/// Index of the profile rules are written to.
///
/// First profile with `"selected": true`, otherwise 0.
pub fn target_profile_index(profiles: &[Value]) -> usize {
    profiles
        .iter()
        .position(|p| p.get("selected").and_then(Value::as_bool) == Some(true))
        .unwrap_or(0)
}

/// The profile rules are written to, if the document has one.
pub fn active_profile(doc: &Value) -> Option<&Map<String, Value>> {
    let profiles = doc.get("profiles")?.as_array()?;
    if profiles.is_empty() {
        return None;
    }
    profiles[target_profile_index(profiles)].as_object()
}

/// Rules in the active profile that were generated by this crate.
pub fn managed_rules(doc: &Value) -> Vec<Value> {
    active_profile(doc)
        .and_then(|p| p.get("complex_modifications"))
        .and_then(|c| c.get("rules"))
        .and_then(Value::as_array)
        .map(|rules| rules.iter().filter(|r| is_managed_rule(r)).cloned().collect())
        .unwrap_or_default()
}

/// Replace managed rules in the active profile of `doc` with `rules`.
pub fn splice_rules(doc: &mut Value, rules: &[Rule]) -> Result<SpliceOutcome, SpliceError> {
    let new_rules = rules
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    let Some(profiles) = doc.get_mut("profiles").and_then(Value::as_array_mut) else {
        debug!("No profiles list in document");
        return Ok(SpliceOutcome::NoProfiles);
    };
    if profiles.is_empty() {
        debug!("Profiles list is empty");
        return Ok(SpliceOutcome::NoProfiles);
    }

    let profile_index = target_profile_index(profiles);
    let Some(profile) = profiles[profile_index].as_object_mut() else {
        debug!("Profile {profile_index} is not an object");
        return Ok(SpliceOutcome::NoProfiles);
    };

    let complex = profile
        .entry("complex_modifications")
        .or_insert_with(|| Value::Object(Map::new()));
    if !complex.is_object() {
        *complex = Value::Object(Map::new());
    }
    let existing = complex
        .as_object_mut()
        .map(|c| c.entry("rules").or_insert_with(|| Value::Array(Vec::new())));
    let Some(existing) = existing else {
        return Ok(SpliceOutcome::NoProfiles);
    };
    if !existing.is_array() {
        *existing = Value::Array(Vec::new());
    }
    let Some(existing) = existing.as_array_mut() else {
        return Ok(SpliceOutcome::NoProfiles);
    };

    let before = existing.len();
    existing.retain(|rule| !is_managed_rule(rule));
    let removed = before - existing.len();
    let added = new_rules.len();
    existing.extend(new_rules);

    debug!("Profile {profile_index}: removed {removed} rule(s), added {added}");
    Ok(SpliceOutcome::Spliced {
        profile_index,
        removed,
        added,
    })
}

/// Read and parse a karabiner.json document.
pub fn read_document(path: &Path) -> Result<Value, SpliceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SpliceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SpliceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print a document the way it is written back to disk.
///
/// Two-space indent, trailing newline; `/` is never escaped.
pub fn to_pretty_json(doc: &Value) -> Result<String, SpliceError> {
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    Ok(out)
}

/// Write a document back to disk.
pub fn write_document(path: &Path, doc: &Value) -> Result<(), SpliceError> {
    let content = to_pretty_json(doc)?;
    std::fs::write(path, content).map_err(|source| SpliceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Read `path`, splice `rules` into its active profile and write it back.
///
/// A read or parse failure leaves the file untouched. [`SpliceOutcome::NoProfiles`]
/// performs no write.
pub fn splice_file(path: &Path, rules: &[Rule]) -> Result<SpliceOutcome, SpliceError> {
    let mut doc = read_document(path)?;
    let outcome = splice_rules(&mut doc, rules)?;

    if let SpliceOutcome::Spliced { added, removed, .. } = outcome {
        write_document(path, &doc)?;
        info!(
            "Updated {} ({added} rule(s) written, {removed} replaced)",
            path.display()
        );
    }
    Ok(outcome)
}
