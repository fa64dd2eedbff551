//! `convoy delete-task` — delete a one-off task.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::task::delete_task;
use crate::domain::DeployError;
use crate::output::TerminalReporter;

/// Arguments for the delete-task command.
#[derive(Args, Debug)]
pub struct DeleteTaskArgs {
    /// Guid of the task
    #[arg(value_name = "TASK_GUID")]
    pub guid: Option<String>,
}

/// Run the delete-task command.
///
/// # Errors
///
/// Returns a usage error if no guid is given, and the cluster's failure
/// reason if the deletion is refused.
pub async fn run(app: &AppContext, args: &DeleteTaskArgs) -> Result<ExitCode> {
    let Some(guid) = args.guid.as_deref().filter(|g| !g.is_empty()) else {
        return Err(DeployError::usage("Please input a valid TASK_GUID").into());
    };
    let cluster = app.cluster()?;
    let reporter = TerminalReporter::new(&app.output);
    delete_task(&cluster.client, &reporter, guid).await?;
    Ok(ExitCode::SUCCESS)
}
