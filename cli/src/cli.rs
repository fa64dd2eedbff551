//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::domain::config::TIMEOUT_SECS_RANGE;

/// Launch, scale, reroute and remove containerized apps on a cluster
#[derive(Parser, Debug)]
#[command(
    name = "convoy",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Seconds to wait for the cluster to converge
    #[arg(
        long,
        global = true,
        env = "CONVOY_TIMEOUT",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(TIMEOUT_SECS_RANGE)
    )]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a docker app
    #[command(visible_alias = "cr")]
    Create(commands::create::CreateArgs),

    /// Scale a docker app
    #[command(visible_alias = "sc")]
    Scale(commands::scale::ScaleArgs),

    /// Update the routes of an app
    #[command(visible_alias = "ur")]
    UpdateRoutes(commands::update_routes::UpdateRoutesArgs),

    /// Stop and remove an app
    #[command(visible_alias = "rm")]
    Remove(commands::remove::RemoveArgs),

    /// Submit a one-off task from a JSON file
    #[command(visible_alias = "su")]
    SubmitTask(commands::submit_task::SubmitTaskArgs),

    /// Delete a one-off task
    #[command(visible_alias = "dt")]
    DeleteTask(commands::delete_task::DeleteTaskArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            quiet,
            no_color,
            timeout,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            timeout_secs: timeout,
        });

        match command {
            Command::Create(args) => commands::create::run(&app, &args).await,
            Command::Scale(args) => commands::scale::run(&app, &args).await,
            Command::UpdateRoutes(args) => commands::update_routes::run(&app, &args).await,
            Command::Remove(args) => commands::remove::run(&app, &args).await,
            Command::SubmitTask(args) => commands::submit_task::run(&app, &args).await,
            Command::DeleteTask(args) => commands::delete_task::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, &cmd),
            Command::Version => Ok(commands::version::run()),
        }
    }
}
