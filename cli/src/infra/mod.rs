//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: HTTP calls to the cluster
//! API, log streaming, process execution, the wall clock, and config files.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod clock;
pub mod cluster;
pub mod command_runner;
pub mod config;
pub mod image;
pub mod logs;
