//! Layered service configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional `qa.toml`
//! in the working directory, then `QA_`-prefixed environment variables with
//! `__` between sections (`QA_SERVER__PORT=9000`).

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::storage::connection::DEFAULT_DATABASE_URL;

pub const CONFIG_FILE_NAME: &str = "qa.toml";
pub const ENV_PREFIX: &str = "QA";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origin allowed to call the API; CORS is off when unset
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from `qa.toml` in the working directory (if any)
    /// and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = env::current_dir()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .ok();
        Self::load_from(file.as_deref())
    }

    /// Load configuration from an explicit file (if it exists) and the environment
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layered(file, ENV_PREFIX)
    }

    fn load_layered(file: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let settings = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .set_default("database.max_connections", 5)?
            .set_default("logging.level", "info")?;

        let settings = match file {
            Some(path) if path.exists() => settings.add_source(File::from(path)),
            _ => settings,
        };

        settings
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
