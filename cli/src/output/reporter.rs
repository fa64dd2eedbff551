//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use std::cell::Cell;
use std::io::Write as _;

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `error()` prints `"  ✗ {message}"` to stderr
/// - `tick()` prints a `.` with no newline (suppressed when `ctx.quiet`)
///
/// A line of ticks is terminated before the next message.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    ticking: Cell<bool>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            ticking: Cell::new(false),
        }
    }

    fn end_ticks(&self) {
        if self.ticking.replace(false) {
            println!();
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            self.end_ticks();
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            self.end_ticks();
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn error(&self, message: &str) {
        self.end_ticks();
        eprintln!("  {} {message}", "✗".style(self.ctx.styles.error));
    }

    fn tick(&self) {
        if !self.ctx.quiet {
            if !self.ticking.replace(true) {
                print!("  ");
            }
            print!("{}", ".".style(self.ctx.styles.dim));
            let _ = std::io::stdout().flush();
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.end_ticks();
    }
}
