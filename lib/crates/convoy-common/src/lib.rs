//! Shared types for the convoy client and cluster API.

pub mod names;
pub mod types;

pub use names::{DEBUG_LOG_APP_ID, ReservedNameError, check_app_name};
pub use types::*;
