//! Exposed/monitored port resolution from flags and image metadata.
//!
//! Pure functions only. Parsing is all-or-nothing: the first bad token
//! rejects the whole ports string.

use convoy_common::PortConfig;

use crate::domain::error::DeployError;

/// Port used when neither flags nor image metadata name one.
pub const DEFAULT_PORT: u16 = 8080;

/// Port-related flags of a create invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortFlags<'a> {
    /// Comma-delimited ports, e.g. `"80,8080"`. Empty counts as absent.
    pub ports: Option<&'a str>,
    /// Explicit health-check port. `Some(0)` counts as absent.
    pub monitored_port: Option<u16>,
    /// `--no-monitor`.
    pub no_monitor: bool,
}

/// Where a resolved port configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSource {
    /// Copied from the image's declared ports.
    Image,
    /// Neither flags nor image declared ports; defaulted to 8080.
    Default,
    /// Parsed from `--ports`.
    Flags,
}

/// A port configuration plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPorts {
    pub config: PortConfig,
    pub source: PortSource,
}

/// Resolve the port configuration of a new app.
///
/// Precedence: image metadata (when `--ports` is absent and the image declares
/// ports), then the 8080 default, then the parsed `--ports` list.
///
/// # Errors
///
/// - [`DeployError::MustSetMonitoredPort`] when several ports are listed with
///   monitoring on and no monitored port.
/// - [`DeployError::InvalidPort`] when any listed token is not an integer in 0-65535.
/// - [`DeployError::MonitoredPortNotExposed`] when the monitored port is not listed.
pub fn resolve_ports(
    flags: &PortFlags<'_>,
    image_ports: &PortConfig,
) -> Result<ResolvedPorts, DeployError> {
    let ports = flags.ports.filter(|p| !p.is_empty());
    let monitored_flag = flags.monitored_port.filter(|p| *p != 0);

    let Some(ports) = ports else {
        if !image_ports.is_empty() {
            return Ok(ResolvedPorts {
                config: image_ports.clone(),
                source: PortSource::Image,
            });
        }
        let monitored = if flags.no_monitor { 0 } else { DEFAULT_PORT };
        return Ok(ResolvedPorts {
            config: PortConfig {
                exposed: vec![DEFAULT_PORT],
                monitored,
            },
            source: PortSource::Default,
        });
    };

    let mut tokens: Vec<&str> = ports.split(',').collect();
    if tokens.len() > 1 && monitored_flag.is_none() && !flags.no_monitor {
        return Err(DeployError::MustSetMonitoredPort);
    }

    tokens.sort_unstable();
    let exposed = tokens
        .iter()
        .map(|t| t.parse::<u16>().map_err(|_| DeployError::InvalidPort))
        .collect::<Result<Vec<_>, _>>()?;

    let monitored = match exposed.as_slice() {
        [only] => *only,
        _ if flags.no_monitor => 0,
        _ => {
            let port = monitored_flag.ok_or(DeployError::MustSetMonitoredPort)?;
            if !exposed.contains(&port) {
                return Err(DeployError::MonitoredPortNotExposed(port));
            }
            port
        }
    };

    Ok(ResolvedPorts {
        config: PortConfig { exposed, monitored },
        source: PortSource::Flags,
    })
}
