//! Version command

use std::process::ExitCode;

/// Run the version command.
#[must_use]
pub fn run() -> ExitCode {
    println!("convoy {}", env!("CARGO_PKG_VERSION"));
    ExitCode::SUCCESS
}
