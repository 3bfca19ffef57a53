//! Configuration management for the Price Tracker backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with PT__ prefix (e.g. PT__DATABASE__URL)

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Price mapping defaults
    pub pricing: PricingConfig,

    /// Bulk import settings
    pub import: ImportConfig,

    /// Catalog rules
    pub catalog: CatalogConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Currency applied when a price arrives without one
    pub default_currency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Directory for transient uploads; the OS temp dir when unset
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,

    /// How many row errors are listed in an import report
    pub max_reported_errors: usize,

    /// Largest accepted upload
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Number of category levels allowed (roots count as level 1)
    pub max_category_depth: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// "pretty" or "json"
    pub format: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("pricing.default_currency", "USD")?
            .set_default("import.max_reported_errors", 10)?
            .set_default("import.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("catalog.max_category_depth", 4)?
            .set_default("logging.format", "pretty")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PT__ prefix)
            .add_source(
                Environment::with_prefix("PT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            upload_dir: None,
            max_reported_errors: 10,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_category_depth: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_defaults() {
        assert_eq!(PricingConfig::default().default_currency, "USD");
        assert_eq!(ImportConfig::default().max_reported_errors, 10);
        assert_eq!(ImportConfig::default().max_upload_bytes, 10 * 1024 * 1024);
        assert!(ImportConfig::default().upload_dir.is_none());
        assert_eq!(CatalogConfig::default().max_category_depth, 4);
        assert_eq!(LoggingConfig::default().format, "pretty");
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            environment: "production".to_string(),
            server: ServerConfig {
                port: 8080,
                host: "127.0.0.1".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/prices".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            pricing: PricingConfig::default(),
            import: ImportConfig::default(),
            catalog: CatalogConfig::default(),
            logging: LoggingConfig::default(),
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(!config.is_development());
    }
}
