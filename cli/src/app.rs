//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is constructed once in `Cli::run()` from the global flags and
//! owns the output context and configuration store. Cluster collaborators are
//! built on demand, after a command has validated its arguments, so usage
//! mistakes never need a configured target.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::application::services::poll::PollSettings;
use crate::domain::ConvoyConfig;
use crate::infra::cluster::HttpClusterClient;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::image::DockerImageFetcher;
use crate::infra::logs::ClusterLogStreamer;
use crate::output::OutputContext;

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Convergence timeout override in seconds.
    pub timeout_secs: Option<u64>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Configuration persistence.
    pub config_store: YamlConfigStore,
    timeout_override: Option<Duration>,
}

/// Cluster-facing collaborators for one command invocation.
pub struct Cluster {
    pub client: HttpClusterClient,
    pub config: ConvoyConfig,
    pub poll: PollSettings,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            config_store: YamlConfigStore,
            timeout_override: flags.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Poll settings for `config`, honouring `--timeout` and `--quiet`.
    #[must_use]
    pub fn poll_settings(&self, config: &ConvoyConfig) -> PollSettings {
        PollSettings {
            show_progress: !self.output.quiet,
            ..PollSettings::with_timeout(self.timeout_override.unwrap_or_else(|| config.timeout()))
        }
    }

    /// Load configuration and build the cluster client.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be read or names no target.
    pub fn cluster(&self) -> Result<Cluster> {
        let config = self.config_store.load()?;
        let client = HttpClusterClient::new(&config)?;
        let poll = self.poll_settings(&config);
        Ok(Cluster {
            client,
            config,
            poll,
        })
    }

    /// Log streamer for `cluster`; silent under `--quiet`.
    #[must_use]
    pub fn log_streamer(&self, cluster: &Cluster) -> ClusterLogStreamer {
        ClusterLogStreamer::new(cluster.client.clone(), !self.output.quiet)
    }

    /// Image metadata fetcher backed by the local docker CLI.
    #[must_use]
    pub fn image_fetcher(&self) -> DockerImageFetcher<TokioCommandRunner> {
        DockerImageFetcher::new(TokioCommandRunner::default())
    }
}
