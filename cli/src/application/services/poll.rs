//! Bounded convergence polling.
//!
//! `poll_until` evaluates a probe against live cluster state once per
//! interval until it reports a terminal result or the deadline passes. Time
//! comes from the injected [`Clock`], so tests drive it without real delays.

use std::time::Duration;

use crate::application::ports::{Clock, ProgressReporter};

/// Time between probe evaluations.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Result of evaluating a probe once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Desired state not reached yet; try again.
    Pending,
    /// Desired state reached.
    Ready,
    /// The desired state can never be reached; stop polling.
    Fatal,
}

/// How a poll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Converged,
    /// Polling stopped early on a permanent failure.
    Fatal,
    TimedOut,
}

impl PollOutcome {
    /// True when polling stopped because the probe returned a terminal result.
    #[must_use]
    pub fn converged(self) -> bool {
        !matches!(self, Self::TimedOut)
    }

    /// True when that terminal result was a permanent failure.
    #[must_use]
    pub fn fatal(self) -> bool {
        matches!(self, Self::Fatal)
    }

    /// True only for a clean convergence.
    #[must_use]
    pub fn succeeded(self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Polling cadence and deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
    /// Emit a progress tick after every unsuccessful probe.
    pub show_progress: bool,
}

impl PollSettings {
    /// One-second polling with the given timeout and progress ticks on.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            interval: POLL_INTERVAL,
            timeout,
            show_progress: true,
        }
    }
}

/// Evaluate `probe` until it returns [`Probe::Ready`] or [`Probe::Fatal`], or
/// until `settings.timeout` has elapsed.
///
/// The first probe runs immediately. A probe is evaluated at every instant
/// `t` with `t <= start + timeout`, so a probe that never succeeds runs
/// `floor(timeout / interval) + 1` times.
pub async fn poll_until<F>(
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    settings: PollSettings,
    mut probe: F,
) -> PollOutcome
where
    F: AsyncFnMut() -> Probe,
{
    // A timeout too large to represent as an instant means no deadline.
    let deadline = clock.now().checked_add(settings.timeout);
    let mut attempts = 0u32;

    while deadline.is_none_or(|deadline| clock.now() <= deadline) {
        attempts += 1;
        match probe().await {
            Probe::Ready => {
                tracing::debug!(attempts, "converged");
                return PollOutcome::Converged;
            }
            Probe::Fatal => {
                tracing::debug!(attempts, "fatal condition reported");
                return PollOutcome::Fatal;
            }
            Probe::Pending => {}
        }
        if settings.show_progress {
            reporter.tick();
        }
        clock.sleep(settings.interval).await;
    }

    tracing::debug!(attempts, timeout = ?settings.timeout, "timed out");
    PollOutcome::TimedOut
}
