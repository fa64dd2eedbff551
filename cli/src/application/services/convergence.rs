//! Cluster-state probes built on [`poll_until`].

use crate::application::ports::{Clock, ClusterApi, ProgressReporter};
use crate::application::services::poll::{PollOutcome, PollSettings, Probe, poll_until};

/// Shown when the cluster reports it cannot place the requested instances.
pub const PLACEMENT_ERROR_MESSAGE: &str = "Error, could not place all instances: insufficient resources. Try requesting fewer instances or reducing the requested memory or disk capacity.";

/// Wait until `name` has exactly `instances` running instances.
///
/// A cluster-reported placement error ends the wait as [`PollOutcome::Fatal`]
/// and is reported through `reporter`. Query errors count as "not yet".
pub async fn wait_for_instances(
    cluster: &impl ClusterApi,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    name: &str,
    instances: u32,
    settings: PollSettings,
) -> PollOutcome {
    let outcome = poll_until(clock, reporter, settings, async || {
        match cluster.instance_summary(name).await {
            Ok(summary) if summary.placement_error => Probe::Fatal,
            Ok(summary) if summary.running == instances => Probe::Ready,
            Ok(summary) => {
                tracing::trace!(app = name, running = summary.running, want = instances, "not converged");
                Probe::Pending
            }
            Err(e) => {
                tracing::debug!(app = name, error = %e, "instance query failed");
                Probe::Pending
            }
        }
    })
    .await;

    if outcome.fatal() {
        reporter.error(PLACEMENT_ERROR_MESSAGE);
    }
    outcome
}

/// Wait until the cluster no longer knows about `name`.
///
/// There is no fatal path: only a successful "does not exist" answer counts.
pub async fn wait_for_removal(
    cluster: &impl ClusterApi,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    name: &str,
    settings: PollSettings,
) -> PollOutcome {
    poll_until(clock, reporter, settings, async || {
        match cluster.app_exists(name).await {
            Ok(false) => Probe::Ready,
            Ok(true) => Probe::Pending,
            Err(e) => {
                tracing::debug!(app = name, error = %e, "existence query failed");
                Probe::Pending
            }
        }
    })
    .await
}
