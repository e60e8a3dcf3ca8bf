// --- File: crates/devstats_config/src/models.rs ---

use config::ConfigError;
use serde::{Deserialize, Serialize};
use url::Url;

// --- Listener Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// --- Database Config ---
// Either `url` is set (DATABASE_URL / DEVSTATS__DATABASE__URL), or the URL is
// assembled from the individual POSTGRES_* parts.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String, // Loaded via POSTGRES_PASSWORD or DEVSTATS__DATABASE__PASSWORD
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Create `device_registrations` on startup when it is missing.
    #[serde(default)]
    pub init_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            name: "devicesdb".to_string(),
            user: "appuser".to_string(),
            password: "apppassword123".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 30,
            init_schema: false,
        }
    }
}

impl DatabaseConfig {
    /// Returns the connection URL handed to the pool.
    ///
    /// An explicit `url` wins; otherwise a `postgres://` URL is built from the
    /// individual parts, percent-encoding the credentials.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.clone());
        }

        let invalid = |what: &str| ConfigError::Message(format!("invalid database {what}"));

        let mut url = Url::parse("postgres://localhost")
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        url.set_host(Some(&self.host)).map_err(|_| invalid("host"))?;
        url.set_port(Some(self.port)).map_err(|_| invalid("port"))?;
        url.set_username(&self.user).map_err(|_| invalid("user"))?;
        url.set_password(Some(&self.password))
            .map_err(|_| invalid("password"))?;
        url.set_path(&self.name);

        Ok(url.to_string())
    }
}

// --- Inter-service client Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegistrationClientConfig {
    /// Base URL of the Device Registration API, without the route path.
    pub base_url: String,
    pub timeout_secs: u64,
}

// --- Unified App Configuration ---
// Both binaries load the same structure and read the sections they need.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub device_registration_api: ServerConfig,
    pub statistics_api: ServerConfig,
    pub registration_client: RegistrationClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            device_registration_api: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            statistics_api: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            registration_client: RegistrationClientConfig {
                base_url: "http://device-registration-api:3001".to_string(),
                timeout_secs: 5,
            },
        }
    }
}
