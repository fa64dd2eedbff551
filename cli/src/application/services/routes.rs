//! Application service — replace an app's route overrides.

use anyhow::{Context, Result};
use convoy_common::RouteOverride;

use crate::application::ports::{ClusterApi, ProgressReporter};
use crate::domain::{format_route_overrides, parse_route_overrides};

/// Parse `routes` and submit them for `name`. Does not wait for propagation.
///
/// # Errors
///
/// Returns `DeployError::MalformedRoute` before contacting the cluster if any
/// route is malformed, or an error if the cluster rejects the update.
pub async fn update_routes(
    cluster: &impl ClusterApi,
    reporter: &impl ProgressReporter,
    name: &str,
    routes: &str,
) -> Result<Vec<RouteOverride>> {
    let routes = parse_route_overrides(routes)?;
    tracing::debug!(app = name, routes = %format_route_overrides(&routes), "updating routes");
    cluster
        .update_routes(name, &routes)
        .await
        .context("updating routes")?;
    reporter.success(&format!("Updating {name} routes. They will take effect shortly."));
    Ok(routes)
}
