//! Razer Naga Side-Button Remapper CLI
//!
//! Edits the button mapping table and keeps Karabiner-Elements' rules in sync.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use naga_config::{AppConfig, ConfigManager};

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    debug!("Loading config from {:?}", config_path);
    let config = AppConfig::load(&config_path)?.with_overrides(cli.karabiner, cli.mappings);

    // init-config works on the config file itself, not the mapping table
    if let Some(Commands::InitConfig { force }) = cli.command {
        return commands::utility::init_config(&config, &config_path, force);
    }
    if let Some(Commands::Keycode { code, flags }) = cli.command {
        return commands::utility::keycode(code, flags);
    }

    let mut manager = ConfigManager::open(&config)?;

    match cli.command {
        // Default: show the grid
        None | Some(Commands::Show) => commands::mapping::show(&manager)?,

        // === Mapping Commands ===
        Some(Commands::List { button }) => commands::mapping::list(&manager, &button)?,
        Some(Commands::Add { button, combo }) => {
            commands::mapping::add(&mut manager, &button, &combo)?;
        }
        Some(Commands::AddFn { button }) => commands::mapping::add_fn(&mut manager, &button)?,
        Some(Commands::Record {
            button,
            code,
            flags,
        }) => {
            commands::mapping::record(&mut manager, &button, code, flags)?;
        }
        Some(Commands::Delete { button, position }) => {
            commands::mapping::delete(&mut manager, &button, position)?;
        }
        Some(Commands::Clear { button }) => commands::mapping::clear(&mut manager, &button)?,
        Some(Commands::Reset { yes }) => commands::mapping::reset(&mut manager, yes)?,

        // === Karabiner Commands ===
        Some(Commands::Apply) => commands::karabiner::apply(&manager)?,
        Some(Commands::Compile) => commands::karabiner::compile(&manager)?,
        Some(Commands::Status) => commands::karabiner::status(&manager)?,

        // Handled above
        Some(Commands::Keycode { .. }) | Some(Commands::InitConfig { .. }) => {}
    }

    Ok(())
}
