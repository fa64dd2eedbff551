//! Application service — submit and delete one-off tasks.

use anyhow::{Context, Result};
use convoy_common::check_app_name;

use crate::application::ports::{ProgressReporter, TaskRunner};
use crate::domain::TaskError;

/// Submit the JSON task definition in `json` and return its guid.
///
/// # Errors
///
/// Returns an error if the JSON is invalid, has no `task_guid`, uses a
/// reserved name, or is rejected by the cluster.
pub async fn submit_task(
    tasks: &impl TaskRunner,
    reporter: &impl ProgressReporter,
    json: &[u8],
) -> Result<String> {
    let definition: serde_json::Value =
        serde_json::from_slice(json).context("parsing task definition")?;
    let guid = definition
        .get("task_guid")
        .and_then(serde_json::Value::as_str)
        .filter(|g| !g.is_empty())
        .ok_or(TaskError::MissingGuid)?
        .to_string();
    check_app_name(&guid)?;

    tasks
        .submit_task(&definition)
        .await
        .with_context(|| format!("submitting {guid}"))?;
    reporter.success(&format!("Successfully submitted {guid}"));
    Ok(guid)
}

/// Delete the task `guid`.
///
/// # Errors
///
/// Returns an error carrying the failure reason if the cluster refuses.
pub async fn delete_task(
    tasks: &impl TaskRunner,
    reporter: &impl ProgressReporter,
    guid: &str,
) -> Result<()> {
    reporter.step(&format!("Deleting the task {guid}"));
    tasks
        .delete_task(guid)
        .await
        .with_context(|| format!("deleting the task {guid}"))?;
    reporter.success("OK");
    Ok(())
}
