//! Application service — create an app and wait for it to run.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};
use convoy_common::{DesiredApp, ResourceLimits};

use crate::application::ports::{
    Clock, ClusterApi, ImageMetadataFetcher, LogStreamer, ProgressReporter,
};
use crate::application::services::convergence::wait_for_instances;
use crate::application::services::poll::{PollOutcome, PollSettings};
use crate::domain::app::{
    Provenance, ValidCreateArgs, app_urls, resolve_start_command, resolve_working_dir,
};
use crate::domain::port_config::{PortFlags, PortSource, resolve_ports};
use crate::domain::{parse_route_overrides, resolve_environment};

/// Everything `convoy create` needs beyond its collaborators.
pub struct CreateOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub args: ValidCreateArgs,
    /// Explicit start command and arguments (after `--`); empty to use the image's.
    pub start_command: &'a [String],
    pub working_dir: Option<&'a str>,
    /// `--env` tokens, `NAME=VALUE` or bare `NAME`.
    pub env: &'a [String],
    /// Inherited `NAME=VALUE` entries bare names are looked up in.
    pub inherited_env: &'a [String],
    pub ports: PortFlags<'a>,
    pub routes: Option<&'a str>,
    pub instances: u32,
    pub memory_mb: u32,
    pub disk_mb: u32,
    pub privileged: bool,
    /// Cluster domain app URLs are built under.
    pub domain: &'a str,
    pub poll: PollSettings,
}

/// Outcome of the `create_app` use-case.
#[derive(Debug)]
pub struct CreateOutcome {
    pub poll: PollOutcome,
    /// URLs the app is reachable on; empty unless the app converged.
    pub urls: Vec<String>,
}

/// Stops a log stream when dropped, whichever way the caller exits.
struct LogTail<'a, L: LogStreamer>(&'a L);

impl<'a, L: LogStreamer> LogTail<'a, L> {
    fn start(logs: &'a L, app: &str) -> Self {
        logs.start(app);
        Self(logs)
    }
}

impl<L: LogStreamer> Drop for LogTail<'_, L> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Build the deployment request for `opts`, submit it, and wait until the
/// requested number of instances is running.
///
/// # Errors
///
/// Returns an error if image metadata cannot be fetched, if port, route, or
/// start-command resolution fails (nothing is submitted), or if the cluster
/// rejects the request. Timeouts and placement failures are reported in the
/// returned [`CreateOutcome`] instead.
pub async fn create_app<R: ProgressReporter>(
    cluster: &impl ClusterApi,
    images: &impl ImageMetadataFetcher,
    logs: &impl LogStreamer,
    clock: &impl Clock,
    opts: CreateOptions<'_, R>,
) -> Result<CreateOutcome> {
    let reporter = opts.reporter;
    let ValidCreateArgs {
        name,
        image,
        cpu_weight,
    } = opts.args;

    let metadata = images
        .fetch(&image)
        .await
        .with_context(|| format!("fetching image metadata for {image}"))?;

    let ports = resolve_ports(&opts.ports, &metadata.ports)?;
    match ports.source {
        PortSource::Image => {
            let listed: Vec<String> = ports.config.exposed.iter().map(u16::to_string).collect();
            reporter.step(&format!(
                "No port specified, using exposed ports from the image metadata: {}",
                listed.join(", ")
            ));
        }
        PortSource::Default if ports.config.is_monitored() => {
            reporter.step(
                "No port specified, image metadata did not contain exposed ports. Defaulting to 8080.",
            );
        }
        PortSource::Default | PortSource::Flags => {}
    }

    let (working_dir, dir_source) = resolve_working_dir(opts.working_dir, &metadata);
    if dir_source == Provenance::Image {
        reporter.step(&format!("Using working directory from the image metadata: {working_dir}"));
    }

    let monitor = !opts.ports.no_monitor;
    if monitor {
        reporter.step(&format!(
            "Monitoring the app on port {}...",
            ports.config.monitored
        ));
    } else {
        reporter.step("No ports will be monitored.");
    }

    let start = resolve_start_command(opts.start_command, &metadata)?;
    if start.provenance == Provenance::Image {
        reporter.step(&format!(
            "Using start command from the image metadata: {}",
            metadata.start_command.join(" ")
        ));
    }

    let routes = parse_route_overrides(opts.routes.unwrap_or_default())?;

    let app = DesiredApp {
        name: name.clone(),
        image,
        start_command: start.command,
        args: start.args,
        env: resolve_environment(opts.env, opts.inherited_env),
        working_dir,
        privileged: opts.privileged,
        monitor,
        instances: opts.instances,
        resources: ResourceLimits {
            cpu_weight,
            memory_mb: opts.memory_mb,
            disk_mb: opts.disk_mb,
        },
        ports: ports.config,
        routes,
    };

    cluster.create_app(&app).await.context("creating app")?;
    reporter.step(&format!("Creating App: {name}"));

    let poll = {
        let _tail = LogTail::start(logs, &name);
        wait_for_instances(cluster, clock, reporter, &name, app.instances, opts.poll).await
    };

    let urls = match poll {
        PollOutcome::Converged => {
            reporter.success(&format!("{name} is now running."));
            app_urls(&name, &app.routes, opts.domain)
        }
        PollOutcome::TimedOut => {
            reporter.error(&format!("{name} took too long to start."));
            Vec::new()
        }
        PollOutcome::Fatal => Vec::new(),
    };

    Ok(CreateOutcome { poll, urls })
}
