//! `convoy update-routes` — replace an app's route overrides.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::routes::update_routes;
use crate::domain::app::validate_update_routes_args;
use crate::output::TerminalReporter;

/// Arguments for the update-routes command.
#[derive(Args, Debug)]
pub struct UpdateRoutesArgs {
    /// Name of the app
    #[arg(value_name = "APP_NAME")]
    pub name: Option<String>,

    /// Comma-delimited routes, e.g. 8080:web,9090:admin
    #[arg(value_name = "NEW_ROUTES")]
    pub routes: Option<String>,
}

/// Run the update-routes command.
///
/// # Errors
///
/// Returns usage errors and malformed routes before anything is submitted,
/// and submission errors from the cluster.
pub async fn run(app: &AppContext, args: &UpdateRoutesArgs) -> Result<ExitCode> {
    let (name, routes) =
        validate_update_routes_args(args.name.as_deref(), args.routes.as_deref())?;
    crate::domain::parse_route_overrides(routes)?;

    let cluster = app.cluster()?;
    let reporter = TerminalReporter::new(&app.output);
    update_routes(&cluster.client, &reporter, name, routes).await?;
    Ok(ExitCode::SUCCESS)
}
