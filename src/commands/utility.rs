//! Utility command handlers.

use super::CommandResult;
use anyhow::bail;
use naga_config::recorder::{self, RecordedKey, STOP_SCAN_CODE};
use naga_config::AppConfig;
use naga_karabiner::keys::{key_code, modifier_code};
use std::path::Path;

/// Describe a virtual key code and modifier flags
pub fn keycode(code: u16, flags: u64) -> CommandResult {
    let key = recorder::key_for_scan_code(code);
    let modifiers = recorder::modifiers_for_key(code, flags);

    println!("Key code:   {code}");
    match key {
        RecordedKey::Key(name) => {
            println!("Key:        {name}");
            println!("Karabiner:  {}", key_code(name));
        }
        RecordedKey::Ignored => println!("Key:        (modifier key, not recorded)"),
        RecordedKey::Unknown(_) => println!("Key:        {key}"),
    }
    if code == STOP_SCAN_CODE {
        println!("            (Escape stops recording)");
    }
    if !modifiers.is_empty() {
        let codes: Vec<&str> = modifiers.iter().map(|m| modifier_code(m)).collect();
        println!("Modifiers:  {} ({})", modifiers.join("+"), codes.join(", "));
    }
    Ok(())
}

/// Write `config` to `path`
pub fn init_config(config: &AppConfig, path: &Path, force: bool) -> CommandResult {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    config.save(path)?;
    println!("Wrote {}", path.display());
    println!("  karabiner_config = {}", config.karabiner_config.display());
    println!("  mappings_file    = {}", config.mappings_file.display());
    Ok(())
}
