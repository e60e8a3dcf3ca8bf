//! Environment variable handling for the device statistics services.
//!
//! Two naming schemes are understood: the structured
//! `DEVSTATS__SECTION__KEY` form read by the `config` crate, and the flat
//! deployment variables (`POSTGRES_HOST`, `STATISTICS_API_PORT`, ...) used by
//! the container setup. The flat variables win.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// The prefix for structured configuration environment variables
pub const CONFIG_PREFIX: &str = "DEVSTATS";

/// The separator for structured configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Flat deployment variables and the configuration path each one overrides.
pub const DEPLOYMENT_VARS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("POSTGRES_HOST", "database.host"),
    ("POSTGRES_PORT", "database.port"),
    ("POSTGRES_DB", "database.name"),
    ("POSTGRES_USER", "database.user"),
    ("POSTGRES_PASSWORD", "database.password"),
    ("DEVICE_REGISTRATION_API_PORT", "device_registration_api.port"),
    ("STATISTICS_API_PORT", "statistics_api.port"),
    ("DEVICE_REGISTRATION_API_URL", "registration_client.base_url"),
    (
        "DEVICE_REGISTRATION_API_TIMEOUT_SECS",
        "registration_client.timeout_secs",
    ),
];

/// Apply the flat deployment variables as overrides on top of `builder`.
///
/// `lookup` resolves a variable name to its value; `load_config` passes
/// `std::env::var`, tests pass a map.
pub fn apply_deployment_overrides<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, path) in DEPLOYMENT_VARS {
        if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
            builder = builder.set_override(*path, value)?;
        }
    }
    Ok(builder)
}
