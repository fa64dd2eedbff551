//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and shared wire types — never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::{Duration, Instant};

use anyhow::Result;
use convoy_common::{DesiredApp, RouteOverride};

use crate::domain::{ConvoyConfig, ImageMetadata};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Instance counts reported by the cluster for one app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceSummary {
    /// Instances currently running.
    pub running: u32,
    /// True if the cluster could not place at least one requested instance.
    pub placement_error: bool,
}

// ── Cluster Port Traits ───────────────────────────────────────────────────────

/// Long-running application operations on the cluster.
#[allow(async_fn_in_trait)]
pub trait ClusterApi {
    /// Ask the cluster to run a new app.
    async fn create_app(&self, app: &DesiredApp) -> Result<()>;
    /// Change the desired instance count of an app.
    async fn scale_app(&self, name: &str, instances: u32) -> Result<()>;
    /// Replace the route overrides of an app.
    async fn update_routes(&self, name: &str, routes: &[RouteOverride]) -> Result<()>;
    /// Stop and remove an app.
    async fn remove_app(&self, name: &str) -> Result<()>;
    /// Current running count and placement status of an app's instances.
    async fn instance_summary(&self, name: &str) -> Result<InstanceSummary>;
    /// Whether the cluster still knows about the app.
    async fn app_exists(&self, name: &str) -> Result<bool>;
}

/// One-off task operations on the cluster.
#[allow(async_fn_in_trait)]
pub trait TaskRunner {
    /// Submit a task definition.
    async fn submit_task(&self, definition: &serde_json::Value) -> Result<()>;
    /// Delete a task by guid.
    async fn delete_task(&self, guid: &str) -> Result<()>;
}

/// Reads what a container image declares about itself.
#[allow(async_fn_in_trait)]
pub trait ImageMetadataFetcher {
    /// Fetch metadata for an image reference such as `redis` or `org/app:1.2`.
    async fn fetch(&self, image: &str) -> Result<ImageMetadata>;
}

/// Streams an app's logs to the terminal in the background.
pub trait LogStreamer {
    /// Begin streaming; returns immediately.
    fn start(&self, app: &str);
    /// Stop streaming. Safe to call when not started.
    fn stop(&self);
}

// ── Time Port ─────────────────────────────────────────────────────────────────

/// Source of "now" and of delays, injectable so polling is testable without
/// real waiting.
#[allow(async_fn_in_trait)]
pub trait Clock {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit an error message. Never suppressed.
    fn error(&self, message: &str);
    /// Emit one progress tick while waiting.
    fn tick(&self);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, returning defaults if none is stored.
    fn load(&self) -> Result<ConvoyConfig>;
    /// Persist configuration.
    fn save(&self, config: &ConvoyConfig) -> Result<()>;
    /// Location of the stored configuration.
    fn path(&self) -> Result<PathBuf>;
}
