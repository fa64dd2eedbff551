//! `convoy scale` — change the number of running instances.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::scale::scale_app;
use crate::commands::outcome_exit_code;
use crate::domain::app::validate_scale_args;
use crate::infra::clock::SystemClock;
use crate::output::TerminalReporter;

/// Arguments for the scale command.
#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Name of the app
    #[arg(value_name = "APP_NAME")]
    pub name: Option<String>,

    /// Desired number of instances
    #[arg(value_name = "NUM_INSTANCES")]
    pub instances: Option<String>,
}

/// Run the scale command.
///
/// # Errors
///
/// Returns usage errors before anything is submitted, and submission errors
/// from the cluster.
pub async fn run(app: &AppContext, args: &ScaleArgs) -> Result<ExitCode> {
    let (name, instances) = validate_scale_args(args.name.as_deref(), args.instances.as_deref())?;
    let cluster = app.cluster()?;
    let reporter = TerminalReporter::new(&app.output);
    let outcome = scale_app(
        &cluster.client,
        &SystemClock,
        &reporter,
        &name,
        instances,
        cluster.poll,
    )
    .await?;
    Ok(outcome_exit_code(outcome))
}
