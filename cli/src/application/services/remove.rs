//! Application service — remove an app and wait until it is gone.

use anyhow::{Context, Result};

use crate::application::ports::{Clock, ClusterApi, ProgressReporter};
use crate::application::services::convergence::wait_for_removal;
use crate::application::services::poll::{PollOutcome, PollSettings};

/// Remove `name` and wait until the cluster reports it no longer exists.
///
/// # Errors
///
/// Returns an error if the cluster rejects the removal. A timeout is
/// reported in the returned [`PollOutcome`].
pub async fn remove_app(
    cluster: &impl ClusterApi,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    name: &str,
    settings: PollSettings,
) -> Result<PollOutcome> {
    cluster.remove_app(name).await.context("removing app")?;
    reporter.step(&format!("Removing {name}"));

    let outcome = wait_for_removal(cluster, clock, reporter, name, settings).await;
    if outcome.succeeded() {
        reporter.success(&format!("Successfully Removed {name}."));
    } else {
        reporter.error(&format!("Failed to remove {name}."));
    }
    Ok(outcome)
}
