//! Tests for the `update_routes` application service.

#![allow(clippy::expect_used)]

use convoy_cli::application::services::routes::update_routes;
use convoy_cli::domain::DeployError;
use convoy_common::RouteOverride;

use crate::mocks::{MockCluster, RecordingReporter};

#[tokio::test]
async fn test_update_routes_submits_parsed_routes_without_waiting() {
    let cluster = MockCluster::new();
    let reporter = RecordingReporter::default();

    let routes = update_routes(&cluster, &reporter, "web", "8080:web,,9090:admin,")
        .await
        .expect("update");

    let expected = vec![
        RouteOverride {
            port: 8080,
            hostname_prefix: "web".to_string(),
        },
        RouteOverride {
            port: 9090,
            hostname_prefix: "admin".to_string(),
        },
    ];
    assert_eq!(routes, expected);
    assert_eq!(
        cluster.routes.lock().expect("lock").clone(),
        Some(expected)
    );
    assert_eq!(cluster.calls(), vec!["update_routes web"]);
    assert!(reporter.contains(
        "success: Updating web routes. They will take effect shortly."
    ));
}

#[tokio::test]
async fn test_update_routes_malformed_route_submits_nothing() {
    let cluster = MockCluster::new();
    let reporter = RecordingReporter::default();

    let err = update_routes(&cluster, &reporter, "web", "8080:web,admin")
        .await
        .expect_err("must fail");

    assert_eq!(err.downcast_ref::<DeployError>(), Some(&DeployError::MalformedRoute));
    assert!(cluster.calls().is_empty());
    assert!(reporter.messages().is_empty());
}

#[tokio::test]
async fn test_update_routes_rejected_request_reports_no_success() {
    let cluster = MockCluster::rejecting();
    let reporter = RecordingReporter::default();

    update_routes(&cluster, &reporter, "web", "8080:web")
        .await
        .expect_err("must fail");

    assert!(!reporter.contains("Updating web routes"));
}
