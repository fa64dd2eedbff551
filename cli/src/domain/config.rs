//! Domain types and validators for convoy configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["target", "api_url", "username", "password", "timeout_secs"];

/// Default time to wait for a command's effect to be observed.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Accepted convergence timeouts: one second to one day.
pub const TIMEOUT_SECS_RANGE: std::ops::RangeInclusive<u64> = 1..=86_400;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.convoy/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvoyConfig {
    /// Cluster domain, e.g. `192.168.11.11.xip.io`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Explicit API base URL; defaults to `http://api.<target>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Convergence timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConvoyConfig {
    fn default() -> Self {
        Self {
            target: None,
            api_url: None,
            username: None,
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConvoyConfig {
    /// Cluster domain apps are routed under.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoTarget`] if no target is configured.
    pub fn domain(&self) -> Result<&str, ConfigError> {
        self.target
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::NoTarget)
    }

    /// Base URL of the cluster API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoTarget`] if neither `api_url` nor `target` is set.
    pub fn api_base(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.api_url.as_deref().filter(|u| !u.is_empty()) {
            return Ok(url.trim_end_matches('/').to_string());
        }
        Ok(format!("http://api.{}", self.domain()?))
    }

    /// Basic-auth credentials, when a username is configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username
            .as_deref()
            .map(|user| (user, self.password.as_deref()))
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply a validated `key = value` setting.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unknown keys or invalid values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        let owned = Some(value.to_string()).filter(|v| !v.is_empty());
        match key {
            "target" => self.target = owned,
            "api_url" => self.api_url = owned,
            "username" => self.username = owned,
            "password" => self.password = owned,
            "timeout_secs" => self.timeout_secs = value.parse()?,
            other => anyhow::bail!("Unknown setting: {other}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let expected = match key {
        "timeout_secs"
            if !matches!(value.parse::<u64>(), Ok(secs) if TIMEOUT_SECS_RANGE.contains(&secs)) =>
        {
            "a number of seconds between 1 and 86400"
        }
        "api_url"
            if !value.is_empty()
                && !value.starts_with("http://")
                && !value.starts_with("https://") =>
        {
            "an http:// or https:// URL"
        }
        "target" if value.contains('/') => "a bare domain, e.g. 192.168.11.11.xip.io",
        _ => return Ok(()),
    };
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
    .into())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
