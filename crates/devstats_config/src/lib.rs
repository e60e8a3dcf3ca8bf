//! Configuration for the device statistics services.
//!
//! Sources are layered, later ones winning:
//!
//! 1. built-in defaults ([`AppConfig::default`])
//! 2. `config/default.{toml,yaml,json}` (optional)
//! 3. `config/<RUN_ENV>.{toml,yaml,json}` (optional, `RUN_ENV` defaults to `debug`)
//! 4. `DEVSTATS__SECTION__KEY` environment variables
//! 5. the flat deployment variables listed in [`env_vars::DEPLOYMENT_VARS`]

use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use std::env;

pub mod env_vars;
pub mod models;

pub use config::ConfigError;
pub use models::*;

/// Loads the configuration from all sources, reading the process environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    build_config(&run_env, |key| env::var(key).ok())
}

/// Builds the configuration for `run_env`, resolving the flat deployment
/// variables through `lookup`.
pub fn build_config<F>(run_env: &str, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let builder = Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(
            Environment::with_prefix(env_vars::CONFIG_PREFIX)
                .separator(env_vars::CONFIG_SEPARATOR),
        );

    let builder = env_vars::apply_deployment_overrides(builder, lookup)?;
    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file defaults to `.env` and can be redirected with `DOTENV_OVERRIDE`.
/// A missing file is not an error. Returns the path that was tried.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        if dotenv::from_filename(&dotenv_path).is_ok() {
            tracing::debug!(path = %dotenv_path, "Loaded dotenv file");
        }
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_deployment_layout() {
        let config = build_config("test", lookup_from(&[])).unwrap();

        assert_eq!(config.statistics_api.port, 3000);
        assert_eq!(config.device_registration_api.port, 3001);
        assert_eq!(config.device_registration_api.host, "0.0.0.0");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(config.database.idle_timeout_secs, 30);
        assert!(!config.database.init_schema);
        assert_eq!(
            config.registration_client.base_url,
            "http://device-registration-api:3001"
        );
    }

    #[test]
    fn deployment_variables_override_defaults() {
        let config = build_config(
            "test",
            lookup_from(&[
                ("POSTGRES_HOST", "db.internal"),
                ("POSTGRES_PORT", "6543"),
                ("POSTGRES_DB", "stats"),
                ("STATISTICS_API_PORT", "8080"),
                ("DEVICE_REGISTRATION_API_URL", "http://127.0.0.1:9999"),
                ("DEVICE_REGISTRATION_API_TIMEOUT_SECS", "2"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.name, "stats");
        assert_eq!(config.statistics_api.port, 8080);
        assert_eq!(config.registration_client.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.registration_client.timeout_secs, 2);
    }

    #[test]
    fn empty_deployment_variables_are_ignored() {
        let config = build_config("test", lookup_from(&[("POSTGRES_HOST", "")])).unwrap();
        assert_eq!(config.database.host, "localhost");
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let result = build_config("test", lookup_from(&[("STATISTICS_API_PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
