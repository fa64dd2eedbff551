//! `convoy submit-task` — submit a one-off task from a JSON file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::task::submit_task;
use crate::domain::DeployError;
use crate::output::TerminalReporter;

/// Arguments for the submit-task command.
#[derive(Args, Debug)]
pub struct SubmitTaskArgs {
    /// Path to a JSON task definition
    #[arg(value_name = "TASK_FILE")]
    pub path: Option<PathBuf>,
}

/// Run the submit-task command.
///
/// # Errors
///
/// Returns a usage error if no path is given, and errors for unreadable or
/// invalid task files and cluster rejections.
pub async fn run(app: &AppContext, args: &SubmitTaskArgs) -> Result<ExitCode> {
    let Some(path) = &args.path else {
        return Err(DeployError::usage("Path to JSON task definition required").into());
    };
    let json = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;

    let cluster = app.cluster()?;
    let reporter = TerminalReporter::new(&app.output);
    submit_task(&cluster.client, &reporter, &json).await?;
    Ok(ExitCode::SUCCESS)
}
