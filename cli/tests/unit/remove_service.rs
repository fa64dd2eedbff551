//! Tests for the `remove_app` application service.

#![allow(clippy::expect_used)]

use convoy_cli::application::services::poll::PollOutcome;
use convoy_cli::application::services::remove::remove_app;

use crate::mocks::{FakeClock, MockCluster, RecordingReporter, poll_settings};

#[tokio::test]
async fn test_remove_succeeds_immediately_when_app_is_gone() {
    let cluster = MockCluster::new().with_exists(&[false]);
    let reporter = RecordingReporter::default();
    let clock = FakeClock::new();

    let outcome = remove_app(&cluster, &clock, &reporter, "web", poll_settings())
        .await
        .expect("remove");

    assert_eq!(outcome, PollOutcome::Converged);
    assert_eq!(cluster.calls(), vec!["remove web", "app_exists web"]);
    assert_eq!(clock.elapsed().as_secs(), 0);
    assert!(reporter.contains("success: Successfully Removed web."));
}

#[tokio::test]
async fn test_remove_waits_while_app_still_exists() {
    let cluster = MockCluster::new().with_exists(&[true, true, false]);
    let reporter = RecordingReporter::default();

    let outcome = remove_app(&cluster, &FakeClock::new(), &reporter, "web", poll_settings())
        .await
        .expect("remove");

    assert_eq!(outcome, PollOutcome::Converged);
    assert_eq!(cluster.count("app_exists"), 3);
    assert_eq!(reporter.ticks(), 2);
}

#[tokio::test]
async fn test_remove_timeout_reports_failure() {
    let cluster = MockCluster::new().with_exists(&[true]);
    let reporter = RecordingReporter::default();

    let outcome = remove_app(&cluster, &FakeClock::new(), &reporter, "web", poll_settings())
        .await
        .expect("remove");

    assert_eq!(outcome, PollOutcome::TimedOut);
    assert_eq!(cluster.count("app_exists"), 11);
    assert!(reporter.contains("error: Failed to remove web."));
    assert!(!reporter.contains("Successfully Removed"));
}

#[tokio::test]
async fn test_remove_rejected_request_does_not_poll() {
    let cluster = MockCluster::rejecting();
    let reporter = RecordingReporter::default();

    remove_app(&cluster, &FakeClock::new(), &reporter, "web", poll_settings())
        .await
        .expect_err("must fail");

    assert_eq!(cluster.count("app_exists"), 0);
}
