//! macOS virtual key code → internal key name, for recording keystrokes.
//!
//! Codes are the `kVK_*` values carried by `NSEvent.keyCode`; modifier flags
//! are the `NSEvent.ModifierFlags` device-independent masks.

use std::fmt;

/// Escape ends a recording session instead of being recorded.
pub const STOP_SCAN_CODE: u16 = 53;

/// `NSEvent.ModifierFlags` masks
pub mod flags {
    pub const SHIFT: u64 = 1 << 17;
    pub const CONTROL: u64 = 1 << 18;
    pub const OPTION: u64 = 1 << 19;
    pub const COMMAND: u64 = 1 << 20;
    pub const FUNCTION: u64 = 1 << 23;
}

/// What a scan code means to the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedKey {
    /// A recordable key with its internal name.
    Key(&'static str),
    /// A standalone modifier key; nothing to record.
    Ignored,
    /// Not in the table.
    Unknown(u16),
}

impl RecordedKey {
    /// Internal key name, if recordable.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            RecordedKey::Key(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RecordedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordedKey::Key(name) => write!(f, "{name}"),
            RecordedKey::Ignored => Ok(()),
            RecordedKey::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// Look up a virtual key code.
#[rustfmt::skip]
pub fn key_for_scan_code(code: u16) -> RecordedKey {
    let name = match code {
        0 => "a", 1 => "s", 2 => "d", 3 => "f", 4 => "h", 5 => "g",
        6 => "z", 7 => "x", 8 => "c", 9 => "v", 11 => "b", 12 => "q",
        13 => "w", 14 => "e", 15 => "r", 16 => "y", 17 => "t",
        31 => "o", 32 => "u", 34 => "i", 35 => "p", 37 => "l", 38 => "j",
        40 => "k", 45 => "n", 46 => "m",
        18 => "1", 19 => "2", 20 => "3", 21 => "4", 23 => "5", 22 => "6",
        26 => "7", 28 => "8", 25 => "9", 29 => "0",
        27 => "minus", 24 => "equal",
        33 => "leftbracket", 30 => "rightbracket",
        43 => "comma", 47 => "period", 44 => "slash",
        41 => "semicolon", 39 => "quote", 42 => "backslash", 50 => "grave",
        36 => "enter", 49 => "space", 48 => "tab", 51 => "backspace",
        123 => "left", 124 => "right", 125 => "down", 126 => "up",
        122 => "f1", 120 => "f2", 99 => "f3", 118 => "f4",
        96 => "f5", 97 => "f6", 98 => "f7", 100 => "f8",
        101 => "f9", 109 => "f10", 103 => "f11", 111 => "f12",
        63 | 179 => "fn",
        55..=62 => return RecordedKey::Ignored,
        _ => return RecordedKey::Unknown(code),
    };
    RecordedKey::Key(name)
}

/// Internal modifier names held in `flags`, in the order cmd, shift, opt,
/// ctrl, fn.
pub fn modifiers_from_flags(bits: u64) -> Vec<&'static str> {
    [
        (flags::COMMAND, "cmd"),
        (flags::SHIFT, "shift"),
        (flags::OPTION, "opt"),
        (flags::CONTROL, "ctrl"),
        (flags::FUNCTION, "fn"),
    ]
    .into_iter()
    .filter(|(mask, _)| bits & mask != 0)
    .map(|(_, name)| name)
    .collect()
}

/// Modifiers to record alongside `code`.
///
/// Pressing Fn sets the function flag itself, so the flag is dropped when the
/// recorded key is Fn.
pub fn modifiers_for_key(code: u16, bits: u64) -> Vec<&'static str> {
    let bits = match key_for_scan_code(code) {
        RecordedKey::Key("fn") => bits & !flags::FUNCTION,
        _ => bits,
    };
    modifiers_from_flags(bits)
}
