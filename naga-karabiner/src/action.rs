//! Actions bound to a mouse button.
//!
//! Only [`Action::Keystroke`] feeds the rule compiler. The launch and delay
//! variants are kept so mapping files written by older versions still load,
//! and any other `type` loads as [`Action::Unknown`]; the compiler skips them.
//!
//! # Combo syntax
//!
//! ```text
//! left            → Keystroke { key: "left", modifiers: [] }
//! cmd+left        → Keystroke { key: "left", modifiers: ["cmd"] }
//! ctrl+shift+tab  → Keystroke { key: "tab", modifiers: ["ctrl", "shift"] }
//! ```

use crate::error::ParseActionError;
use crate::keys;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// What a button press does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Send a key, optionally with modifiers held.
    #[serde(alias = "shortcut")]
    Keystroke {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        #[serde(default, deserialize_with = "null_as_empty")]
        modifiers: Vec<String>,
    },
    /// Launch a program (legacy, not compiled).
    Launch {
        path: String,
        #[serde(default, deserialize_with = "null_as_empty")]
        args: Vec<String>,
    },
    /// Wait before the next action (legacy, not compiled).
    Delay { duration: f64 },
    /// Any other `type`. Loads so the rest of the table survives; never compiled.
    #[serde(other)]
    Unknown,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}

impl Action {
    /// Keystroke action with the given key and modifiers.
    pub fn keystroke<K, I, M>(key: K, modifiers: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Action::Keystroke {
            key: Some(key.into()),
            modifiers: modifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `+`-separated combo such as `cmd+shift+left`.
    ///
    /// The last segment is the key, every earlier one a modifier. Modifier
    /// names are not checked here; the compiler maps unknown ones to
    /// [`keys::FALLBACK_MODIFIER`].
    pub fn keystroke_from_combo(combo: &str) -> Result<Self, ParseActionError> {
        let combo = combo.trim();
        if combo.is_empty() {
            return Err(ParseActionError::Empty);
        }

        let mut parts: Vec<String> = Vec::new();
        for part in combo.split('+') {
            let part = part.trim();
            if part.is_empty() {
                return Err(ParseActionError::EmptySegment(combo.to_string()));
            }
            parts.push(part.to_ascii_lowercase());
        }

        // split() always yields at least one item
        let key = parts.pop().ok_or(ParseActionError::Empty)?;
        Ok(Action::Keystroke {
            key: Some(key),
            modifiers: parts,
        })
    }

    /// The key to emit, if this action compiles to an output event.
    pub fn compiled_key(&self) -> Option<&str> {
        match self {
            Action::Keystroke { key: Some(key), .. } if !key.is_empty() => Some(key.as_str()),
            _ => None,
        }
    }

    /// Modifier names of a keystroke (empty for other variants).
    pub fn modifiers(&self) -> &[String] {
        match self {
            Action::Keystroke { modifiers, .. } => modifiers,
            _ => &[],
        }
    }

    /// Lower-case variant name, as written in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Keystroke { .. } => "keystroke",
            Action::Launch { .. } => "launch",
            Action::Delay { .. } => "delay",
            Action::Unknown => "unknown",
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::keystroke_from_combo(s)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Keystroke { key, modifiers } => {
                for m in modifiers {
                    write!(f, "{}", keys::modifier_glyph(m))?;
                }
                if let Some(key) = key {
                    write!(f, "{}", key.to_uppercase())?;
                }
                Ok(())
            }
            Action::Launch { .. } => write!(f, "Launch"),
            Action::Delay { .. } => write!(f, "Delay"),
            Action::Unknown => write!(f, "Unknown"),
        }
    }
}

/// An [`Action`] plus a stable id for list editing.
///
/// The id never reaches the generated rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(flatten)]
    pub action: Action,
}

impl ActionRecord {
    pub fn new(action: Action) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
        }
    }
}

impl From<Action> for ActionRecord {
    fn from(action: Action) -> Self {
        Self::new(action)
    }
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.action, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_key() {
        assert_eq!(
            "left".parse::<Action>().unwrap(),
            Action::keystroke("left", Vec::<String>::new())
        );
        assert_eq!(
            " A ".parse::<Action>().unwrap(),
            Action::keystroke("a", Vec::<String>::new())
        );
    }

    #[test]
    fn parse_combo_keeps_modifier_order() {
        let action: Action = "Ctrl+Shift+Tab".parse().unwrap();
        assert_eq!(action, Action::keystroke("tab", ["ctrl", "shift"]));
        assert_eq!(action.modifiers(), ["ctrl", "shift"]);
    }

    #[test]
    fn parse_does_not_validate_modifiers() {
        let action: Action = "alt+x".parse().unwrap();
        assert_eq!(action.modifiers(), ["alt"]);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!("".parse::<Action>(), Err(ParseActionError::Empty)));
        assert!(matches!(
            "cmd+".parse::<Action>(),
            Err(ParseActionError::EmptySegment(_))
        ));
        assert!(matches!(
            "cmd++a".parse::<Action>(),
            Err(ParseActionError::EmptySegment(_))
        ));
    }

    #[test]
    fn compiled_key_requires_non_empty_keystroke() {
        assert_eq!(
            Action::keystroke("a", ["cmd"]).compiled_key(),
            Some("a")
        );
        let no_key = Action::Keystroke {
            key: None,
            modifiers: vec!["cmd".into()],
        };
        assert_eq!(no_key.compiled_key(), None);
        let empty_key = Action::Keystroke {
            key: Some(String::new()),
            modifiers: vec![],
        };
        assert_eq!(empty_key.compiled_key(), None);
        assert_eq!(Action::Delay { duration: 0.5 }.compiled_key(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Action::keystroke("left", ["cmd"]).to_string(), "⌘LEFT");
        assert_eq!(
            Action::keystroke("a", ["cmd", "shift"]).to_string(),
            "⌘⇧A"
        );
        assert_eq!(Action::keystroke("fn", Vec::<String>::new()).to_string(), "FN");
        assert_eq!(
            Action::Launch {
                path: "/Applications/Calculator.app".into(),
                args: vec![]
            }
            .to_string(),
            "Launch"
        );
    }

    #[test]
    fn record_serializes_flat() {
        let record = ActionRecord::new(Action::keystroke("esc", ["opt"]));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "keystroke");
        assert_eq!(value["key"], "esc");
        assert_eq!(value["modifiers"], serde_json::json!(["opt"]));
        assert_eq!(value["id"], record.id.to_string());
    }

    #[test]
    fn legacy_shortcut_record_loads() {
        // Shape written by the macOS app: every field present, nulls included
        let json = r#"{
            "id": "E621E1F8-C36C-495A-93FC-0C247A3E6E5F",
            "type": "shortcut",
            "key": "left",
            "modifiers": null,
            "path": null,
            "args": null,
            "duration": null
        }"#;
        let record: ActionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.id.to_string(),
            "e621e1f8-c36c-495a-93fc-0c247a3e6e5f"
        );
        assert_eq!(record.action, Action::keystroke("left", Vec::<String>::new()));
    }

    #[test]
    fn missing_id_is_generated() {
        let a: ActionRecord = serde_json::from_str(r#"{"type":"keystroke","key":"a"}"#).unwrap();
        let b: ActionRecord = serde_json::from_str(r#"{"type":"keystroke","key":"a"}"#).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.action, b.action);
    }

    #[test]
    fn legacy_variants_load() {
        let launch: ActionRecord =
            serde_json::from_str(r#"{"type":"launch","path":"/bin/true","args":null}"#).unwrap();
        assert_eq!(launch.action.kind(), "launch");
        let delay: ActionRecord =
            serde_json::from_str(r#"{"type":"delay","duration":0.25}"#).unwrap();
        assert_eq!(delay.action, Action::Delay { duration: 0.25 });
    }

    #[test]
    fn unrecognised_type_loads_as_unknown() {
        let record: ActionRecord =
            serde_json::from_str(r#"{"type":"macro","key":"b","modifiers":["cmd"]}"#).unwrap();
        assert_eq!(record.action, Action::Unknown);
        assert_eq!(record.action.compiled_key(), None);
        assert!(record.action.modifiers().is_empty());
        assert_eq!(record.to_string(), "Unknown");

        let table: std::collections::BTreeMap<String, Vec<ActionRecord>> = serde_json::from_str(
            r#"{"1":[{"type":"keystroke","key":"a"}],"2":[{"type":"macro","key":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(table["1"][0].action.compiled_key(), Some("a"));
        assert_eq!(table["2"][0].action, Action::Unknown);
    }
}
