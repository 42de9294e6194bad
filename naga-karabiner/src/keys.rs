//! Key, modifier and button lookup tables.
//!
//! Internal names are the short lower-case names the mapping store records
//! (`"left"`, `"esc"`, `"cmd"`). Karabiner names are the `key_code` /
//! `modifiers` vocabulary of karabiner.json. Every lookup here is total:
//! unknown input resolves to a fallback instead of failing.

/// Physical key the mouse emits for buttons outside the 1-12 grid.
pub const FALLBACK_BUTTON_KEY: &str = "1";

/// Karabiner modifier used for any unrecognised modifier name.
pub const FALLBACK_MODIFIER: &str = "left_command";

/// Convert an internal key name to its Karabiner `key_code`.
///
/// Case-insensitive. Names outside the table pass through unchanged, so
/// single letters, digits and function keys (`"a"`, `"7"`, `"f5"`) work
/// without an entry.
pub fn key_code(key: &str) -> &str {
    let code = match key.to_ascii_lowercase().as_str() {
        "left" => "left_arrow",
        "right" => "right_arrow",
        "up" => "up_arrow",
        "down" => "down_arrow",
        "cmd" | "command" => "left_command",
        "esc" => "escape",
        "return" | "enter" => "return_or_enter",
        "leftbracket" | "[" => "open_bracket",
        "rightbracket" | "]" => "close_bracket",
        "minus" | "-" => "hyphen",
        "equal" | "=" => "equal_sign",
        "quote" | "'" => "quote",
        "semicolon" | ";" => "semicolon",
        "comma" | "," => "comma",
        "period" | "." => "period",
        "slash" | "/" => "slash",
        "backslash" | "\\" => "backslash",
        _ => return key,
    };
    code
}

/// Convert an internal modifier name to its Karabiner modifier.
///
/// Anything outside `cmd`/`opt`/`ctrl`/`shift`/`fn` becomes
/// [`FALLBACK_MODIFIER`].
pub fn modifier_code(modifier: &str) -> &'static str {
    match modifier {
        "cmd" => "left_command",
        "opt" => "left_option",
        "ctrl" => "left_control",
        "shift" => "left_shift",
        "fn" => "fn",
        _ => FALLBACK_MODIFIER,
    }
}

/// Physical key the Naga side grid sends for a button id.
///
/// The mouse exposes its twelve side buttons as the number row; ids outside
/// "1".."12" map to [`FALLBACK_BUTTON_KEY`].
pub fn button_key(button: &str) -> &'static str {
    match button {
        "1" => "1",
        "2" => "2",
        "3" => "3",
        "4" => "4",
        "5" => "5",
        "6" => "6",
        "7" => "7",
        "8" => "8",
        "9" => "9",
        "10" => "0",
        "11" => "hyphen",
        "12" => "equal_sign",
        _ => FALLBACK_BUTTON_KEY,
    }
}

/// Short display glyph for an internal modifier name (empty if unknown).
pub fn modifier_glyph(modifier: &str) -> &'static str {
    match modifier {
        "cmd" => "⌘",
        "shift" => "⇧",
        "opt" => "⌥",
        "ctrl" => "⌃",
        "fn" => "Fn",
        _ => "",
    }
}
