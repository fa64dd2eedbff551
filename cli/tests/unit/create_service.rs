//! Tests for the `create_app` application service.
//!
//! Verifies request construction from flags and image metadata, that nothing
//! is submitted when resolution fails, convergence handling, and that the log
//! stream is stopped on every exit path once started.

#![allow(clippy::expect_used)]

use convoy_cli::application::ports::InstanceSummary;
use convoy_cli::application::services::convergence::PLACEMENT_ERROR_MESSAGE;
use convoy_cli::application::services::create::{CreateOptions, create_app};
use convoy_cli::application::services::poll::PollOutcome;
use convoy_cli::domain::app::ValidCreateArgs;
use convoy_cli::domain::{DeployError, PortFlags};
use convoy_common::{PortConfig, RouteOverride};

use crate::mocks::{FakeClock, MockCluster, MockImages, MockLogs, RecordingReporter, poll_settings};

const DOMAIN: &str = "apps.example.com";

fn options<'a>(reporter: &'a RecordingReporter, start_command: &'a [String]) -> CreateOptions<'a, RecordingReporter> {
    CreateOptions {
        reporter,
        args: ValidCreateArgs {
            name: "web".to_string(),
            image: "org/web".to_string(),
            cpu_weight: 100,
        },
        start_command,
        working_dir: None,
        env: &[],
        inherited_env: &[],
        ports: PortFlags::default(),
        routes: None,
        instances: 1,
        memory_mb: 128,
        disk_mb: 1024,
        privileged: false,
        domain: DOMAIN,
        poll: poll_settings(),
    }
}

fn command(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_create_submits_routes_in_order_and_prints_one_url_per_route() {
    let cluster = MockCluster::new().with_running(&[0, 1]);
    let images = MockImages::declaring(&["/start"], "/app", &[80, 8080]);
    let logs = MockLogs::default();
    let reporter = RecordingReporter::default();

    let outcome = create_app(
        &cluster,
        &images,
        &logs,
        &FakeClock::new(),
        CreateOptions {
            routes: Some("80:web,8080:api"),
            ..options(&reporter, &[])
        },
    )
    .await
    .expect("create");

    let app = cluster.created().expect("submitted");
    assert_eq!(
        app.routes,
        vec![
            RouteOverride {
                port: 80,
                hostname_prefix: "web".to_string()
            },
            RouteOverride {
                port: 8080,
                hostname_prefix: "api".to_string()
            },
        ]
    );
    assert_eq!(outcome.poll, PollOutcome::Converged);
    assert_eq!(
        outcome.urls,
        vec!["http://web.apps.example.com", "http://api.apps.example.com"]
    );
    assert!(reporter.contains("success: web is now running."));
}

#[tokio::test]
async fn test_create_without_routes_prints_url_from_app_name() {
    let cluster = MockCluster::new().with_running(&[1]);
    let images = MockImages::declaring(&["/start"], "", &[]);
    let reporter = RecordingReporter::default();

    let outcome = create_app(
        &cluster,
        &images,
        &MockLogs::default(),
        &FakeClock::new(),
        options(&reporter, &[]),
    )
    .await
    .expect("create");

    assert_eq!(outcome.urls, vec!["http://web.apps.example.com"]);
    assert!(cluster.created().expect("submitted").routes.is_empty());
}

#[tokio::test]
async fn test_create_no_monitor_without_declared_ports_exposes_8080_unmonitored() {
    let cluster = MockCluster::new().with_running(&[1]);
    let reporter = RecordingReporter::default();
    let start = command(&["/run"]);

    create_app(
        &cluster,
        &MockImages::bare(),
        &MockLogs::default(),
        &FakeClock::new(),
        CreateOptions {
            ports: PortFlags {
                no_monitor: true,
                ..PortFlags::default()
            },
            ..options(&reporter, &start)
        },
    )
    .await
    .expect("create");

    let app = cluster.created().expect("submitted");
    assert_eq!(
        app.ports,
        PortConfig {
            exposed: vec![8080],
            monitored: 0
        }
    );
    assert!(!app.monitor);
    assert!(reporter.contains("No ports will be monitored."));
}

#[tokio::test]
async fn test_create_uses_image_metadata_and_narrates_it() {
    let cluster = MockCluster::new().with_running(&[1]);
    let images = MockImages::declaring(&["/bin/server", "--port", "9090"], "/srv", &[9090, 9443]);
    let reporter = RecordingReporter::default();

    create_app(
        &cluster,
        &images,
        &MockLogs::default(),
        &FakeClock::new(),
        options(&reporter, &[]),
    )
    .await
    .expect("create");

    let app = cluster.created().expect("submitted");
    assert_eq!(app.start_command, "/bin/server");
    assert_eq!(app.args, vec!["--port", "9090"]);
    assert_eq!(app.working_dir, "/srv");
    assert_eq!(app.ports.exposed, vec![9090, 9443]);
    assert_eq!(app.ports.monitored, 9090);
    assert!(app.monitor);
    assert!(reporter.contains("using exposed ports from the image metadata: 9090, 9443"));
    assert!(reporter.contains("Using working directory from the image metadata: /srv"));
    assert!(reporter.contains("Using start command from the image metadata: /bin/server --port 9090"));
    assert!(reporter.contains("Monitoring the app on port 9090..."));
}

#[tokio::test]
async fn test_create_explicit_settings_override_image_metadata() {
    let cluster = MockCluster::new().with_running(&[2]);
    let images = MockImages::declaring(&["/bin/server"], "/srv", &[9090]);
    let reporter = RecordingReporter::default();
    let start = command(&["/custom", "-v"]);
    let env = command(&["COLOR=blue", "HOME", "MISSING"]);
    let inherited = command(&["HOMEPATH=/x", "HOME=/root"]);

    create_app(
        &cluster,
        &images,
        &MockLogs::default(),
        &FakeClock::new(),
        CreateOptions {
            working_dir: Some("/work"),
            env: &env,
            inherited_env: &inherited,
            ports: PortFlags {
                ports: Some("3000"),
                ..PortFlags::default()
            },
            instances: 2,
            memory_mb: 256,
            privileged: true,
            ..options(&reporter, &start)
        },
    )
    .await
    .expect("create");

    let app = cluster.created().expect("submitted");
    assert_eq!(app.start_command, "/custom");
    assert_eq!(app.args, vec!["-v"]);
    assert_eq!(app.working_dir, "/work");
    assert_eq!(app.ports.exposed, vec![3000]);
    assert_eq!(app.ports.monitored, 3000);
    assert_eq!(app.instances, 2);
    assert_eq!(app.resources.memory_mb, 256);
    assert!(app.privileged);
    assert_eq!(app.env.get("COLOR").map(String::as_str), Some("blue"));
    assert_eq!(app.env.get("HOME").map(String::as_str), Some("/root"));
    assert_eq!(app.env.get("MISSING").map(String::as_str), Some(""));
    assert!(!reporter.contains("from the image metadata"));
}

#[tokio::test]
async fn test_create_without_any_start_command_submits_nothing() {
    let cluster = MockCluster::new();
    let logs = MockLogs::default();
    let reporter = RecordingReporter::default();

    let err = create_app(
        &cluster,
        &MockImages::bare(),
        &logs,
        &FakeClock::new(),
        options(&reporter, &[]),
    )
    .await
    .expect_err("must fail");

    assert_eq!(err.downcast_ref::<DeployError>(), Some(&DeployError::MissingStartCommand));
    assert!(cluster.calls().is_empty());
    assert!(logs.started().is_empty());
}

#[tokio::test]
async fn test_create_invalid_port_submits_nothing() {
    let cluster = MockCluster::new();
    let reporter = RecordingReporter::default();
    let start = command(&["/run"]);

    let err = create_app(
        &cluster,
        &MockImages::bare(),
        &MockLogs::default(),
        &FakeClock::new(),
        CreateOptions {
            ports: PortFlags {
                ports: Some("8080,http"),
                monitored_port: Some(8080),
                no_monitor: false,
            },
            ..options(&reporter, &start)
        },
    )
    .await
    .expect_err("must fail");

    assert_eq!(
        err.to_string(),
        "Invalid port specified. Ports must be a comma-delimited list of integers between 0-65535."
    );
    assert!(cluster.calls().is_empty());
}

#[tokio::test]
async fn test_create_multiple_ports_without_monitored_port_submits_nothing() {
    let cluster = MockCluster::new();
    let reporter = RecordingReporter::default();
    let start = command(&["/run"]);

    let err = create_app(
        &cluster,
        &MockImages::bare(),
        &MockLogs::default(),
        &FakeClock::new(),
        CreateOptions {
            ports: PortFlags {
                ports: Some("8080,9090"),
                ..PortFlags::default()
            },
            ..options(&reporter, &start)
        },
    )
    .await
    .expect_err("must fail");

    assert_eq!(err.downcast_ref::<DeployError>(), Some(&DeployError::MustSetMonitoredPort));
    assert!(cluster.calls().is_empty());
}

#[tokio::test]
async fn test_create_malformed_route_submits_nothing() {
    let cluster = MockCluster::new();
    let reporter = RecordingReporter::default();
    let start = command(&["/run"]);

    let err = create_app(
        &cluster,
        &MockImages::bare(),
        &MockLogs::default(),
        &FakeClock::new(),
        CreateOptions {
            routes: Some("80:web,api"),
            ..options(&reporter, &start)
        },
    )
    .await
    .expect_err("must fail");

    assert_eq!(err.to_string(), "Malformed route. Routes must be of the format route:port");
    assert!(cluster.calls().is_empty());
}

#[tokio::test]
async fn test_create_rejected_submission_never_starts_logs() {
    let cluster = MockCluster::rejecting();
    let logs = MockLogs::default();
    let reporter = RecordingReporter::default();
    let start = command(&["/run"]);

    let err = create_app(
        &cluster,
        &MockImages::bare(),
        &logs,
        &FakeClock::new(),
        options(&reporter, &start),
    )
    .await
    .expect_err("must fail");

    assert!(format!("{err:#}").contains("500"));
    assert_eq!(cluster.count("instance_summary"), 0);
    assert!(logs.started().is_empty());
}

#[tokio::test]
async fn test_create_streams_logs_and_stops_them_after_convergence() {
    let cluster = MockCluster::new().with_running(&[0, 0, 1]);
    let logs = MockLogs::default();
    let reporter = RecordingReporter::default();
    let start = command(&["/run"]);

    create_app(
        &cluster,
        &MockImages::bare(),
        &logs,
        &FakeClock::new(),
        options(&reporter, &start),
    )
    .await
    .expect("create");

    assert_eq!(logs.started(), vec!["web"]);
    assert_eq!(logs.stops(), 1);
    assert_eq!(cluster.count("instance_summary"), 3);
    assert_eq!(reporter.ticks(), 2);
}

#[tokio::test]
async fn test_create_placement_error_is_fatal_without_success_or_urls() {
    let cluster = MockCluster::new().with_summaries([Ok(InstanceSummary {
        running: 0,
        placement_error: true,
    })]);
    let logs = MockLogs::default();
    let reporter = RecordingReporter::default();
    let start = command(&["/run"]);

    let outcome = create_app(
        &cluster,
        &MockImages::bare(),
        &logs,
        &FakeClock::new(),
        options(&reporter, &start),
    )
    .await
    .expect("create");

    assert_eq!(outcome.poll, PollOutcome::Fatal);
    assert!(outcome.urls.is_empty());
    assert!(reporter.contains(&format!("error: {PLACEMENT_ERROR_MESSAGE}")));
    assert!(!reporter.contains("is now running"));
    assert_eq!(logs.stops(), 1);
}

#[tokio::test]
async fn test_create_timeout_reports_and_stops_logs() {
    let cluster = MockCluster::new().with_running(&[0]);
    let logs = MockLogs::default();
    let reporter = RecordingReporter::default();
    let clock = FakeClock::new();
    let start = command(&["/run"]);

    let outcome = create_app(&cluster, &MockImages::bare(), &logs, &clock, options(&reporter, &start))
        .await
        .expect("create");

    assert_eq!(outcome.poll, PollOutcome::TimedOut);
    assert!(outcome.urls.is_empty());
    assert!(reporter.contains("error: web took too long to start."));
    assert_eq!(cluster.count("instance_summary"), 11);
    assert_eq!(logs.stops(), 1);
}

#[tokio::test]
async fn test_create_query_errors_count_as_not_yet() {
    let cluster = MockCluster::new().with_summaries([
        Err("connection reset".to_string()),
        Ok(InstanceSummary {
            running: 1,
            placement_error: false,
        }),
    ]);
    let reporter = RecordingReporter::default();
    let start = command(&["/run"]);

    let outcome = create_app(
        &cluster,
        &MockImages::bare(),
        &MockLogs::default(),
        &FakeClock::new(),
        options(&reporter, &start),
    )
    .await
    .expect("create");

    assert_eq!(outcome.poll, PollOutcome::Converged);
    assert_eq!(cluster.count("instance_summary"), 2);
}
