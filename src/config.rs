//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/default.toml, config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 8080)
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Store selector
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    /// Volatile, lost on restart
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Path to SQLite database file
    pub path: PathBuf,
    /// Pool size
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub fn filter_directive(&self) -> String {
        format!("yatter={},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (YATTER__*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.backend", "sqlite")?
            .set_default("database.path", "data/yatter.db")?
            .set_default("database.max_connections", 5)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (YATTER__*)
            .add_source(
                Environment::with_prefix("YATTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.database.max_connections == 0 {
            return Err(crate::error::AppError::Config(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        if self.database.backend == StoreBackend::Sqlite
            && self.database.path.as_os_str().is_empty()
        {
            return Err(crate::error::AppError::Config(
                "database.path is required when database.backend=sqlite".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(crate::error::AppError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                backend: StoreBackend::Sqlite,
                path: PathBuf::from("/tmp/yatter-test.db"),
                max_connections: 5,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(valid_config().validate().is_ok());
        assert_eq!(valid_config().server.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn validate_rejects_empty_pool() {
        let mut config = valid_config();
        config.database.max_connections = 0;

        let error = config
            .validate()
            .expect_err("a pool without connections must fail");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message)
                if message.contains("database.max_connections")
        ));
    }

    #[test]
    fn validate_requires_path_only_for_sqlite() {
        let mut config = valid_config();
        config.database.path = PathBuf::new();
        assert!(config.validate().is_err());

        config.database.backend = StoreBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn logging_section_drives_the_subscriber() {
        let mut config = valid_config();
        assert_eq!(config.logging.filter_directive(), "yatter=info,tower_http=debug");
        assert!(!config.logging.is_json());

        config.logging.level = "debug".to_string();
        config.logging.format = "json".to_string();
        assert_eq!(
            config.logging.filter_directive(),
            "yatter=debug,tower_http=debug"
        );
        assert!(config.logging.is_json());
    }

    #[test]
    fn validate_rejects_unknown_log_format() {
        let mut config = valid_config();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
