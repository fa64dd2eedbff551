//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use convoy_common::ReservedNameError;
use thiserror::Error;

// ── Deployment errors ─────────────────────────────────────────────────────────

/// Errors raised while turning command-line input into a deployment request.
///
/// Every variant is raised before any cluster call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeployError {
    #[error(
        "Invalid port specified. Ports must be a comma-delimited list of integers between 0-65535."
    )]
    InvalidPort,

    #[error("Malformed route. Routes must be of the format route:port")]
    MalformedRoute,

    #[error(
        "Must set monitored-port when specifying multiple exposed ports unless --no-monitor is set."
    )]
    MustSetMonitoredPort,

    #[error("Monitored port {0} is not one of the exposed ports.")]
    MonitoredPortNotExposed(u16),

    #[error("Unable to determine start command from image metadata.")]
    MissingStartCommand,

    #[error("Incorrect Usage: {0}")]
    Usage(String),

    #[error(transparent)]
    ReservedName(#[from] ReservedNameError),
}

impl DeployError {
    /// Build a usage error from a message.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// True for malformed invocations (as opposed to bad flag values).
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::ReservedName(_))
    }
}

// ── Task errors ───────────────────────────────────────────────────────────────

/// Errors related to one-off task definitions.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task definition must contain a non-empty \"task_guid\" string.")]
    MissingGuid,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("No target set. Run 'convoy config set target <domain>'.")]
    NoTarget,
}
