//! Application service — scale an app and wait for the new instance count.

use anyhow::{Context, Result};

use crate::application::ports::{Clock, ClusterApi, ProgressReporter};
use crate::application::services::convergence::wait_for_instances;
use crate::application::services::poll::{PollOutcome, PollSettings};

/// Set the instance count of `name` and wait until it is observed.
///
/// # Errors
///
/// Returns an error if the cluster rejects the scale request. Timeouts and
/// placement failures are reported in the returned [`PollOutcome`].
pub async fn scale_app(
    cluster: &impl ClusterApi,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    name: &str,
    instances: u32,
    settings: PollSettings,
) -> Result<PollOutcome> {
    cluster
        .scale_app(name, instances)
        .await
        .with_context(|| format!("scaling app to {instances} instances"))?;
    reporter.step(&format!("Scaling {name} to {instances} instances"));

    let outcome = wait_for_instances(cluster, clock, reporter, name, instances, settings).await;
    match outcome {
        PollOutcome::Converged => reporter.success("App Scaled Successfully"),
        PollOutcome::TimedOut => reporter.error(&format!("{name} took too long to scale.")),
        PollOutcome::Fatal => {}
    }
    Ok(outcome)
}
