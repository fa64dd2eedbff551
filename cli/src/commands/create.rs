//! `convoy create` — launch an app from a docker image.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::create::{CreateOptions, create_app};
use crate::commands::outcome_exit_code;
use crate::domain::PortFlags;
use crate::domain::app::{CreateArgsInput, validate_create_args};
use crate::infra::clock::SystemClock;
use crate::output::TerminalReporter;

/// Arguments for the create command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the app
    #[arg(value_name = "APP_NAME")]
    pub name: Option<String>,

    /// Docker image to run, e.g. `redis` or `org/app:1.2`
    #[arg(value_name = "DOCKER_IMAGE")]
    pub image: Option<String>,

    #[arg(hide = true, value_name = "ARGS")]
    pub unseparated: Vec<String>,

    /// Start command and arguments, after `--`
    #[arg(last = true, value_name = "START_COMMAND")]
    pub start_command: Vec<String>,

    /// Working directory inside the container
    #[arg(short = 'w', long)]
    pub working_dir: Option<String>,

    /// Run the start command as root
    #[arg(short = 'r', long)]
    pub run_as_root: bool,

    /// Environment variable, NAME=VALUE or NAME to inherit (repeatable)
    #[arg(short = 'e', long = "env", value_name = "NAME[=VALUE]")]
    pub env: Vec<String>,

    /// Relative CPU weight, 1-100
    #[arg(long, default_value_t = 100)]
    pub cpu_weight: u32,

    /// Memory limit in MB
    #[arg(short = 'm', long, default_value_t = 128)]
    pub memory_mb: u32,

    /// Disk limit in MB
    #[arg(short = 'd', long, default_value_t = 1024)]
    pub disk_mb: u32,

    /// Comma-delimited ports to expose, e.g. 8080,9090
    #[arg(short = 'p', long)]
    pub ports: Option<String>,

    /// Port used to health-check instances
    #[arg(long)]
    pub monitored_port: Option<u16>,

    /// Route overrides, e.g. 8080:web,9090:admin
    #[arg(long)]
    pub routes: Option<String>,

    /// Number of instances to start
    #[arg(long, default_value_t = 1)]
    pub instances: u32,

    /// Do not health-check instances
    #[arg(long)]
    pub no_monitor: bool,
}

/// Run the create command.
///
/// # Errors
///
/// Returns usage and validation errors before anything is submitted, and
/// submission errors from the cluster.
pub async fn run(app: &AppContext, args: &CreateArgs) -> Result<ExitCode> {
    let valid = validate_create_args(&CreateArgsInput {
        name: args.name.as_deref(),
        image: args.image.as_deref(),
        unseparated: &args.unseparated,
        start_command: &args.start_command,
        cpu_weight: args.cpu_weight,
    })?;

    let cluster = app.cluster()?;
    let domain = cluster.config.domain()?.to_string();
    let images = app.image_fetcher();
    let logs = app.log_streamer(&cluster);
    let reporter = TerminalReporter::new(&app.output);
    let inherited_env: Vec<String> = std::env::vars().map(|(k, v)| format!("{k}={v}")).collect();

    let outcome = create_app(
        &cluster.client,
        &images,
        &logs,
        &SystemClock,
        CreateOptions {
            reporter: &reporter,
            args: valid,
            start_command: &args.start_command,
            working_dir: args.working_dir.as_deref(),
            env: &args.env,
            inherited_env: &inherited_env,
            ports: PortFlags {
                ports: args.ports.as_deref(),
                monitored_port: args.monitored_port,
                no_monitor: args.no_monitor,
            },
            routes: args.routes.as_deref(),
            instances: args.instances,
            memory_mb: args.memory_mb,
            disk_mb: args.disk_mb,
            privileged: args.run_as_root,
            domain: &domain,
            poll: cluster.poll,
        },
    )
    .await?;
    drop(reporter);

    for url in &outcome.urls {
        app.output.link(url);
    }
    Ok(outcome_exit_code(outcome.poll))
}
