//! Tests for the task submission and deletion services.

#![allow(clippy::expect_used)]

use convoy_cli::application::services::task::{delete_task, submit_task};
use convoy_common::ReservedNameError;

use crate::mocks::{MockTasks, RecordingReporter};

#[tokio::test]
async fn test_submit_task_returns_guid_and_sends_definition_verbatim() {
    let tasks = MockTasks::default();
    let reporter = RecordingReporter::default();
    let json = br#"{"task_guid":"migrate-1","action":{"run":{"path":"/migrate"}}}"#;

    let guid = submit_task(&tasks, &reporter, json).await.expect("submit");

    assert_eq!(guid, "migrate-1");
    let submitted = tasks.submitted.lock().expect("lock");
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0]["action"]["run"]["path"], "/migrate");
    assert!(reporter.contains("success: Successfully submitted migrate-1"));
}

#[tokio::test]
async fn test_submit_task_without_guid_is_rejected_locally() {
    let tasks = MockTasks::default();
    let reporter = RecordingReporter::default();

    let definitions: [&[u8]; 3] = [
        br#"{"action":{}}"#,
        br#"{"task_guid":""}"#,
        br#"{"task_guid":7}"#,
    ];
    for json in definitions {
        let err = submit_task(&tasks, &reporter, json)
            .await
            .expect_err("must fail");
        assert!(err.to_string().contains("task_guid"), "{err}");
    }
    assert!(tasks.submitted.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_submit_task_invalid_json_is_rejected_locally() {
    let tasks = MockTasks::default();
    let err = submit_task(&tasks, &RecordingReporter::default(), b"{not json")
        .await
        .expect_err("must fail");
    assert!(err.to_string().contains("parsing task definition"));
}

#[tokio::test]
async fn test_submit_task_reserved_name_is_rejected() {
    let tasks = MockTasks::default();
    let err = submit_task(
        &tasks,
        &RecordingReporter::default(),
        br#"{"task_guid":"convoy-debug"}"#,
    )
    .await
    .expect_err("must fail");
    assert!(err.downcast_ref::<ReservedNameError>().is_some());
    assert!(tasks.submitted.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_delete_task_reports_ok() {
    let tasks = MockTasks::default();
    let reporter = RecordingReporter::default();

    delete_task(&tasks, &reporter, "migrate-1").await.expect("delete");

    assert_eq!(*tasks.deleted.lock().expect("lock"), vec!["migrate-1"]);
    assert!(reporter.contains("success: OK"));
}

#[tokio::test]
async fn test_delete_task_surfaces_failure_reason() {
    let tasks = MockTasks {
        refuse_with: Some("task not found".to_string()),
        ..MockTasks::default()
    };
    let reporter = RecordingReporter::default();

    let err = delete_task(&tasks, &reporter, "nope").await.expect_err("must fail");

    assert!(format!("{err:#}").contains("task not found"));
    assert!(!reporter.contains("success: OK"));
}
