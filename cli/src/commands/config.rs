//! `convoy config` — show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the config cannot be read or written, or if `set` is
/// given an unknown key or invalid value.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, key, value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;
    let unset = "(not set)".to_string();

    println!("  {}", path.display());
    println!();
    println!("  target:       {}", config.target.as_ref().unwrap_or(&unset));
    println!(
        "  api_url:      {}",
        config.api_base().unwrap_or_else(|_| unset.clone())
    );
    println!("  username:     {}", config.username.as_ref().unwrap_or(&unset));
    println!(
        "  password:     {}",
        if config.password.is_some() { "********" } else { "(not set)" }
    );
    println!("  timeout_secs: {}", config.timeout_secs);
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    config_service::set_config(&app.config_store, key, value)?;
    let shown = if key == "password" { "********" } else { value };
    app.output.success(&format!("Set {key} = {shown}"));
    Ok(ExitCode::SUCCESS)
}
