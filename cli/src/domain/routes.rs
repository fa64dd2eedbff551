//! Route override parsing.
//!
//! `"80:web,8080:api"` maps port 80 to hostname prefix `web` and port 8080 to
//! `api`. Parsing is all-or-nothing.

use convoy_common::RouteOverride;

use crate::domain::error::DeployError;

/// Parse a comma-delimited `PORT:HOSTNAME_PREFIX` list.
///
/// Empty segments are skipped; an empty string yields no overrides, meaning
/// default routing by application name. Order and duplicates are preserved.
///
/// # Errors
///
/// Returns [`DeployError::MalformedRoute`] if any segment lacks a colon or has
/// a port that is not an integer in 0-65535.
pub fn parse_route_overrides(routes: &str) -> Result<Vec<RouteOverride>, DeployError> {
    routes
        .split(',')
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
        .collect()
}

fn parse_segment(segment: &str) -> Result<RouteOverride, DeployError> {
    let (port, prefix) = segment
        .split_once(':')
        .ok_or(DeployError::MalformedRoute)?;
    let port = port.parse::<u16>().map_err(|_| DeployError::MalformedRoute)?;
    Ok(RouteOverride {
        port,
        hostname_prefix: prefix.to_string(),
    })
}

/// Render overrides back into the flag syntax accepted by [`parse_route_overrides`].
#[must_use]
pub fn format_route_overrides(routes: &[RouteOverride]) -> String {
    routes
        .iter()
        .map(|r| format!("{}:{}", r.port, r.hostname_prefix))
        .collect::<Vec<_>>()
        .join(",")
}
