//! Button mapping command handlers.

use super::{print_save_report, CommandResult};
use anyhow::{bail, Context};
use naga_config::recorder::{self, RecordedKey, STOP_SCAN_CODE};
use naga_config::{ConfigManager, GRID_BUTTONS};
use naga_karabiner::keys::button_key;
use naga_karabiner::Action;
use std::io::{BufRead, Write};
use tracing::warn;

fn check_button(button: &str) {
    let in_grid = button
        .parse::<u8>()
        .is_ok_and(|n| (1..=GRID_BUTTONS).contains(&n));
    if !in_grid {
        warn!(
            "Button {button} is outside 1-{GRID_BUTTONS}; its rule will trigger on key \"{}\"",
            button_key(button)
        );
    }
}

/// Show the button grid
pub fn show(manager: &ConfigManager) -> CommandResult {
    let store = manager.store();
    println!("Naga side buttons:");
    for row in 0..GRID_BUTTONS / 3 {
        let cells: Vec<String> = (1..=3)
            .map(|col| {
                let button = (row * 3 + col).to_string();
                format!("{button:>3}: {:<18}", store.summary(&button))
            })
            .collect();
        println!("  {}", cells.join(""));
    }

    let extra: Vec<&str> = store
        .buttons()
        .filter(|b| {
            !b.parse::<u8>()
                .is_ok_and(|n| (1..=GRID_BUTTONS).contains(&n))
        })
        .collect();
    if !extra.is_empty() {
        println!("\nOther buttons:");
        for button in extra {
            println!("  {button:>5}: {}", store.summary(button));
        }
    }
    Ok(())
}

/// List the actions on one button
pub fn list(manager: &ConfigManager, button: &str) -> CommandResult {
    let actions = manager.store().actions(button);
    println!("Button {button}");
    if actions.is_empty() {
        println!("  (no actions)");
        return Ok(());
    }
    for (i, record) in actions.iter().enumerate() {
        println!("  {}. {:<12} [{}]", i + 1, record.to_string(), record.action.kind());
    }
    Ok(())
}

/// Append a keystroke parsed from combo syntax
pub fn add(manager: &mut ConfigManager, button: &str, combo: &str) -> CommandResult {
    check_button(button);
    let action: Action = combo
        .parse()
        .with_context(|| format!("Invalid key combo \"{combo}\""))?;
    let report = manager.add(button, action);
    print_save_report(&report);
    Ok(())
}

/// Append a bare Fn keystroke
pub fn add_fn(manager: &mut ConfigManager, button: &str) -> CommandResult {
    check_button(button);
    let report = manager.add(button, Action::keystroke("fn", Vec::<String>::new()));
    print_save_report(&report);
    Ok(())
}

/// Record a keystroke from a virtual key code and modifier flags
pub fn record(manager: &mut ConfigManager, button: &str, code: u16, flags: u64) -> CommandResult {
    if code == STOP_SCAN_CODE {
        println!("Escape ends recording; nothing added");
        return Ok(());
    }
    // Unknown codes are recorded as "unknown(<code>)" and pass through to Karabiner as-is
    let key = match recorder::key_for_scan_code(code) {
        RecordedKey::Key(name) => name.to_string(),
        RecordedKey::Ignored => {
            println!("Key code {code} is a modifier key; nothing added");
            return Ok(());
        }
        unknown @ RecordedKey::Unknown(_) => unknown.to_string(),
    };
    check_button(button);
    let modifiers = recorder::modifiers_for_key(code, flags);
    let report = manager.add(button, Action::keystroke(key, modifiers));
    print_save_report(&report);
    Ok(())
}

/// Remove the action at a 1-based position
pub fn delete(manager: &mut ConfigManager, button: &str, position: u16) -> CommandResult {
    let (removed, report) = manager.delete(button, usize::from(position) - 1)?;
    println!("Removed {removed} from button {button}");
    print_save_report(&report);
    Ok(())
}

/// Remove every action on a button
pub fn clear(manager: &mut ConfigManager, button: &str) -> CommandResult {
    let report = manager.clear(button);
    print_save_report(&report);
    Ok(())
}

/// Clear all mappings, asking first unless `yes`
pub fn reset(manager: &mut ConfigManager, yes: bool) -> CommandResult {
    if !yes && !confirm("Are you sure you want to clear all mappings?")? {
        bail!("Reset cancelled");
    }
    let report = manager.reset();
    print_save_report(&report);
    Ok(())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
