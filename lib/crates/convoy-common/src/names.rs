//! Application names reserved by the cluster.

use thiserror::Error;

/// App id the cluster uses internally to stream debug logs for its own components.
pub const DEBUG_LOG_APP_ID: &str = "convoy-debug";

/// Raised when a user tries to claim a reserved application name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "{0} is a reserved app name. It is used internally to stream debug logs for cluster components."
)]
pub struct ReservedNameError(pub String);

/// Reject names the cluster reserves for itself.
pub fn check_app_name(name: &str) -> Result<(), ReservedNameError> {
    if name == DEBUG_LOG_APP_ID {
        return Err(ReservedNameError(name.to_string()));
    }
    Ok(())
}
