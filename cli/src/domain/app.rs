//! Application-level validation and resolution for deployment commands.
//!
//! Pure functions only. Checks run in a fixed order so the first reported
//! problem does not depend on which flags happen to be present.

use convoy_common::{RouteOverride, check_app_name};

use crate::domain::error::DeployError;
use crate::domain::image::ImageMetadata;

/// Valid range for `--cpu-weight`.
pub const CPU_WEIGHT_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Working directory used when neither flag nor image provides one.
pub const DEFAULT_WORKING_DIR: &str = "/";

/// Raw positional input of `convoy create`.
#[derive(Debug, Clone, Copy)]
pub struct CreateArgsInput<'a> {
    pub name: Option<&'a str>,
    pub image: Option<&'a str>,
    /// Positionals after the image that were not preceded by `--`.
    pub unseparated: &'a [String],
    /// Everything after `--`.
    pub start_command: &'a [String],
    pub cpu_weight: u32,
}

/// Positional input of `convoy create` after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCreateArgs {
    pub name: String,
    pub image: String,
    pub cpu_weight: u8,
}

/// Validate `convoy create` input: argument count, then `--` separator, then
/// CPU weight range, then reserved names.
///
/// # Errors
///
/// Returns a usage [`DeployError`] for the first failed check.
pub fn validate_create_args(input: &CreateArgsInput<'_>) -> Result<ValidCreateArgs, DeployError> {
    let (Some(name), Some(image)) = (non_empty(input.name), non_empty(input.image)) else {
        return Err(DeployError::usage("APP_NAME and DOCKER_IMAGE are required"));
    };
    if !input.unseparated.is_empty() {
        return Err(DeployError::usage("'--' Required before start command"));
    }
    let cpu_weight = u8::try_from(input.cpu_weight)
        .ok()
        .filter(|w| CPU_WEIGHT_RANGE.contains(&u32::from(*w)))
        .ok_or_else(|| DeployError::usage("Invalid CPU Weight"))?;
    check_app_name(name)?;

    Ok(ValidCreateArgs {
        name: name.to_string(),
        image: image.to_string(),
        cpu_weight,
    })
}

/// Validate `convoy scale APP_NAME NUM_INSTANCES`.
///
/// # Errors
///
/// Returns a usage [`DeployError`] if either argument is missing or the
/// instance count is not a non-negative integer.
pub fn validate_scale_args(
    name: Option<&str>,
    instances: Option<&str>,
) -> Result<(String, u32), DeployError> {
    let (Some(name), Some(instances)) = (non_empty(name), non_empty(instances)) else {
        return Err(DeployError::usage(
            "Please enter 'convoy scale APP_NAME NUMBER_OF_INSTANCES'",
        ));
    };
    let instances = instances
        .parse::<u32>()
        .map_err(|_| DeployError::usage("Number of Instances must be an integer"))?;
    Ok((name.to_string(), instances))
}

/// Validate `convoy update-routes APP_NAME ROUTES`.
///
/// # Errors
///
/// Returns a usage [`DeployError`] if either argument is missing.
pub fn validate_update_routes_args<'a>(
    name: Option<&'a str>,
    routes: Option<&'a str>,
) -> Result<(&'a str, &'a str), DeployError> {
    match (non_empty(name), non_empty(routes)) {
        (Some(name), Some(routes)) => Ok((name, routes)),
        _ => Err(DeployError::usage(
            "Please enter 'convoy update-routes APP_NAME NEW_ROUTES'",
        )),
    }
}

/// Validate `convoy remove APP_NAME`.
///
/// # Errors
///
/// Returns a usage [`DeployError`] if the name is missing.
pub fn validate_remove_args(name: Option<&str>) -> Result<&str, DeployError> {
    non_empty(name).ok_or_else(|| DeployError::usage("App Name required"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Where a resolved create setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Flag,
    Image,
    Default,
}

/// Working directory: flag, else image, else `/`.
#[must_use]
pub fn resolve_working_dir(flag: Option<&str>, image: &ImageMetadata) -> (String, Provenance) {
    if let Some(dir) = non_empty(flag) {
        return (dir.to_string(), Provenance::Flag);
    }
    if image.working_dir.is_empty() {
        (DEFAULT_WORKING_DIR.to_string(), Provenance::Default)
    } else {
        (image.working_dir.clone(), Provenance::Image)
    }
}

/// A start command split into executable and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCommand {
    pub command: String,
    pub args: Vec<String>,
    pub provenance: Provenance,
}

/// Start command: the explicit one after `--`, else the image's declared one.
///
/// # Errors
///
/// Returns [`DeployError::MissingStartCommand`] when neither is present.
pub fn resolve_start_command(
    explicit: &[String],
    image: &ImageMetadata,
) -> Result<StartCommand, DeployError> {
    let (tokens, provenance) = if explicit.is_empty() {
        (image.start_command.as_slice(), Provenance::Image)
    } else {
        (explicit, Provenance::Flag)
    };
    let (command, args) = tokens
        .split_first()
        .ok_or(DeployError::MissingStartCommand)?;
    Ok(StartCommand {
        command: command.clone(),
        args: args.to_vec(),
        provenance,
    })
}

/// Public URL for a hostname prefix under the cluster domain.
#[must_use]
pub fn url_for(prefix: &str, domain: &str) -> String {
    format!("http://{prefix}.{domain}")
}

/// URLs an app is reachable on: one per route override, else one for its name.
#[must_use]
pub fn app_urls(name: &str, routes: &[RouteOverride], domain: &str) -> Vec<String> {
    if routes.is_empty() {
        return vec![url_for(name, domain)];
    }
    routes
        .iter()
        .map(|r| url_for(&r.hostname_prefix, domain))
        .collect()
}
