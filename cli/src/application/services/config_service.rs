//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::ConvoyConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<ConvoyConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or storage failures.
/// Nothing is written when validation fails.
pub fn set_config(store: &impl ConfigStore, key: &str, value: &str) -> Result<ConvoyConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
