//! `convoy remove` — stop and remove an app.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::remove::remove_app;
use crate::commands::outcome_exit_code;
use crate::domain::app::validate_remove_args;
use crate::infra::clock::SystemClock;
use crate::output::TerminalReporter;

/// Arguments for the remove command.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the app
    #[arg(value_name = "APP_NAME")]
    pub name: Option<String>,
}

/// Run the remove command.
///
/// # Errors
///
/// Returns a usage error if no name is given, and submission errors from the
/// cluster.
pub async fn run(app: &AppContext, args: &RemoveArgs) -> Result<ExitCode> {
    let name = validate_remove_args(args.name.as_deref())?;
    let cluster = app.cluster()?;
    let reporter = TerminalReporter::new(&app.output);
    let outcome = remove_app(&cluster.client, &SystemClock, &reporter, name, cluster.poll).await?;
    Ok(outcome_exit_code(outcome))
}
