use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ports an application exposes and the one used for health checks.
///
/// `monitored == 0` means the application is not health-checked. Otherwise
/// `monitored` is one of `exposed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    pub exposed: Vec<u16>,
    #[serde(default)]
    pub monitored: u16,
}

impl PortConfig {
    /// True when no ports are exposed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exposed.is_empty()
    }

    /// True when a port is health-checked.
    #[must_use]
    pub fn is_monitored(&self) -> bool {
        self.monitored != 0
    }
}

/// Explicit mapping from an exposed port to a public hostname prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOverride {
    pub port: u16,
    pub hostname_prefix: String,
}

/// Per-instance resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Relative CPU weight, 1-100.
    pub cpu_weight: u8,
    pub memory_mb: u32,
    pub disk_mb: u32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            cpu_weight: 100,
            memory_mb: 128,
            disk_mb: 1024,
        }
    }
}

/// Body of a create request: everything the cluster needs to run an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredApp {
    pub name: String,
    pub image: String,
    pub start_command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    pub working_dir: String,
    #[serde(default)]
    pub privileged: bool,
    pub monitor: bool,
    pub instances: u32,
    pub resources: ResourceLimits,
    pub ports: PortConfig,
    /// Empty means route by application name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteOverride>,
}

/// Body of a scale request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRequest {
    pub instances: u32,
}

/// Body of a route update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesRequest {
    pub routes: Vec<RouteOverride>,
}

/// Lifecycle state of one scheduled instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Unclaimed,
    Claimed,
    Running,
    Crashed,
}

/// One instance as reported by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualInstance {
    pub index: u32,
    pub state: InstanceState,
    /// Non-empty when the cluster could not place this instance.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placement_error: String,
}
