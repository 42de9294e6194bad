//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `mapping`: Button mapping commands (show, list, add, add-fn, record, delete, clear, reset)
//! - `karabiner`: Karabiner config commands (apply, compile, status)
//! - `utility`: Utility commands (keycode, init-config)

pub mod karabiner;
pub mod mapping;
pub mod utility;

use naga_config::SaveReport;
use naga_karabiner::SpliceOutcome;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Print the outcome of a save.
///
/// Failures were already logged by the save pipeline; this is the
/// user-facing line.
pub fn print_save_report(report: &SaveReport) {
    match (&report.stored, &report.splice) {
        (Ok(()), Ok(SpliceOutcome::Spliced { .. })) => {
            println!("Saved ✓ ({} rule(s) in Karabiner config)", report.rules);
        }
        (stored, splice) => {
            if let Err(e) = stored {
                eprintln!("Mappings not saved: {e}");
            }
            match splice {
                Ok(SpliceOutcome::Spliced { .. }) => {}
                Ok(SpliceOutcome::NoProfiles) => {
                    eprintln!("Karabiner config has no profiles; rules not written")
                }
                Err(e) => eprintln!("Karabiner config not updated: {e}"),
            }
        }
    }
}
