//! Karabiner config command handlers.

use super::{print_save_report, CommandResult};
use naga_config::ConfigManager;
use naga_karabiner::splice::{self, read_document, to_pretty_json};

/// Re-save everything
pub fn apply(manager: &ConfigManager) -> CommandResult {
    println!(
        "Writing rules to {}...",
        manager.karabiner_config().display()
    );
    let report = manager.save();
    print_save_report(&report);
    Ok(())
}

/// Print the compiled rules without touching any file
pub fn compile(manager: &ConfigManager) -> CommandResult {
    let rules = serde_json::to_value(manager.rules())?;
    print!("{}", to_pretty_json(&rules)?);
    Ok(())
}

/// Show the Naga rules currently in karabiner.json
pub fn status(manager: &ConfigManager) -> CommandResult {
    let path = manager.karabiner_config();
    let doc = read_document(path)?;
    println!("Karabiner config: {}", path.display());

    let Some(profile) = splice::active_profile(&doc) else {
        println!("  No profiles");
        return Ok(());
    };
    let name = profile
        .get("name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("(unnamed)");
    println!("Active profile:   {name}");

    let installed = splice::managed_rules(&doc);
    let expected = serde_json::to_value(manager.rules())?;
    println!("Naga rules:       {}", installed.len());
    for rule in &installed {
        let description = rule
            .get("description")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("?");
        println!("  - {description}");
    }

    if expected.as_array().is_some_and(|e| *e == installed) {
        println!("Up to date ✓");
    } else {
        println!("Out of date; run `naga-config apply`");
    }
    Ok(())
}
