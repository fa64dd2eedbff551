//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod app;
pub mod config;
pub mod environment;
pub mod error;
pub mod image;
pub mod port_config;
pub mod routes;

pub use config::{ConvoyConfig, validate_config_key, validate_config_value};
pub use environment::{EnvironmentMap, resolve_environment};
pub use error::{ConfigError, DeployError, TaskError};
pub use image::ImageMetadata;
pub use port_config::{PortFlags, PortSource, ResolvedPorts, resolve_ports};
pub use routes::{format_route_overrides, parse_route_overrides};
