// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "naga-config")]
#[command(author, version, about = "Razer Naga side-button remapper for Karabiner-Elements")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/naga-config/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Karabiner config to update (overrides the config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub karabiner: Option<PathBuf>,

    /// Mapping table location (overrides the config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub mappings: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Mapping Commands ===
    /// Show the 12-button grid with a summary of each mapping
    #[command(visible_aliases = ["grid", "ls"])]
    Show,

    /// List the actions bound to one button
    #[command(visible_alias = "l")]
    List {
        /// Button number (1-12)
        button: String,
    },

    /// Bind a keystroke to a button (appended to its actions)
    #[command(visible_alias = "a")]
    Add {
        /// Button number (1-12)
        button: String,
        /// Key combo, e.g. "left", "cmd+left", "ctrl+shift+tab"
        combo: String,
    },

    /// Bind the Fn key to a button
    AddFn {
        /// Button number (1-12)
        button: String,
    },

    /// Record a keystroke from a macOS virtual key code and modifier flags
    Record {
        /// Button number (1-12)
        button: String,
        /// Virtual key code (NSEvent.keyCode)
        code: u16,
        /// NSEvent modifier flags
        #[arg(long, default_value_t = 0)]
        flags: u64,
    },

    /// Remove one action from a button
    #[command(visible_aliases = ["del", "rm"])]
    Delete {
        /// Button number (1-12)
        button: String,
        /// Position in the button's list (1-based, as shown by `list`)
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        position: u16,
    },

    /// Remove every action from a button
    Clear {
        /// Button number (1-12)
        button: String,
    },

    /// Clear all mappings
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    // === Karabiner Commands ===
    /// Re-save the mappings and rewrite the Karabiner rules
    #[command(visible_alias = "save")]
    Apply,

    /// Print the rules the current mappings compile to
    Compile,

    /// Show the Naga rules currently in the Karabiner config
    #[command(visible_alias = "st")]
    Status,

    // === Utility Commands ===
    /// Look up a macOS virtual key code
    #[command(visible_alias = "key")]
    Keycode {
        /// Virtual key code (NSEvent.keyCode)
        code: u16,
        /// NSEvent modifier flags
        #[arg(long, default_value_t = 0)]
        flags: u64,
    },

    /// Write a config file with the default paths
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
