//! Command implementations

pub mod config;
pub mod create;
pub mod delete_task;
pub mod remove;
pub mod scale;
pub mod submit_task;
pub mod update_routes;
pub mod version;

use std::process::ExitCode;

use convoy_common::ReservedNameError;

use crate::application::services::poll::PollOutcome;
use crate::domain::DeployError;

/// Malformed invocation; matches clap's own exit code.
pub const EXIT_USAGE: u8 = 2;
/// A flag value failed validation before anything was submitted.
pub const EXIT_VALIDATION: u8 = 3;
/// The cluster cannot place the requested instances.
pub const EXIT_PLACEMENT: u8 = 4;

/// Map an error returned by a command handler to a process exit code.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(deploy) = err.downcast_ref::<DeployError>() {
        return if deploy.is_usage() {
            ExitCode::from(EXIT_USAGE)
        } else {
            ExitCode::from(EXIT_VALIDATION)
        };
    }
    if err.downcast_ref::<ReservedNameError>().is_some() {
        return ExitCode::from(EXIT_USAGE);
    }
    ExitCode::FAILURE
}

/// Exit code for a finished convergence wait.
#[must_use]
pub fn outcome_exit_code(outcome: PollOutcome) -> ExitCode {
    match outcome {
        PollOutcome::Converged => ExitCode::SUCCESS,
        PollOutcome::Fatal => ExitCode::from(EXIT_PLACEMENT),
        PollOutcome::TimedOut => ExitCode::FAILURE,
    }
}
