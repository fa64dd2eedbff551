//! Container image metadata and its decoding from `docker image inspect`.
//!
//! Pure functions only — the fetch itself lives behind the
//! `ImageMetadataFetcher` port.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use convoy_common::PortConfig;
use serde::Deserialize;

/// What an image declares about how it wants to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Declared working directory; empty if none.
    pub working_dir: String,
    /// Entrypoint followed by default arguments.
    pub start_command: Vec<String>,
    /// Declared ports; empty if the image exposes none.
    pub ports: PortConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectEntry {
    config: Option<InspectConfig>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct InspectConfig {
    working_dir: Option<String>,
    entrypoint: Option<Vec<String>>,
    cmd: Option<Vec<String>>,
    exposed_ports: Option<BTreeMap<String, serde_json::Value>>,
}

impl ImageMetadata {
    /// Decode the JSON array printed by `docker image inspect <ref>`.
    ///
    /// Exposed ports (`"8080/tcp"`) are sorted ascending and the lowest one
    /// is monitored.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, the array is empty, or a
    /// declared port is not a valid port number.
    pub fn from_inspect(json: &[u8]) -> Result<Self> {
        let entries: Vec<InspectEntry> =
            serde_json::from_slice(json).context("parsing docker inspect output")?;
        let entry = entries
            .into_iter()
            .next()
            .context("docker inspect returned no images")?;
        let config = entry.config.unwrap_or_default();

        let mut start_command = config.entrypoint.unwrap_or_default();
        start_command.extend(config.cmd.unwrap_or_default());

        let mut exposed = config
            .exposed_ports
            .unwrap_or_default()
            .keys()
            .map(|key| parse_exposed_port(key))
            .collect::<Result<Vec<_>>>()?;
        exposed.sort_unstable();
        exposed.dedup();
        let monitored = exposed.first().copied().unwrap_or(0);

        Ok(Self {
            working_dir: config.working_dir.unwrap_or_default(),
            start_command,
            ports: PortConfig { exposed, monitored },
        })
    }
}

fn parse_exposed_port(key: &str) -> Result<u16> {
    let port = key.split_once('/').map_or(key, |(port, _proto)| port);
    port.parse()
        .with_context(|| format!("invalid exposed port in image metadata: {key}"))
}
