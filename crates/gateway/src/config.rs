//! Gateway configuration.

use std::env;
use std::path::PathBuf;

use common::{parse_or, ConfigError, DatabaseConfig, SecurityConfig};

/// Runtime environment name that turns on production behaviour
pub const PROD_ENV: &str = "prod";

/// 64 MiB; several full-size camera photos per request
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// `dev` or `prod`
    pub environment: String,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    /// Root directory for uploaded images
    pub images_dir: PathBuf,
    /// Request body cap for image uploads
    pub max_upload_bytes: usize,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// `strict` forces production mode: secrets must be provided and SQL
    /// statement logging is off.
    pub fn from_env(strict: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(strict, |name| env::var(name).ok())
    }

    pub fn from_lookup(
        strict: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let environment = if strict {
            PROD_ENV.to_string()
        } else {
            lookup("APP_ENV").unwrap_or(defaults.environment)
        };
        let is_prod = environment == PROD_ENV;

        let mut database = DatabaseConfig::from_lookup(&lookup)?;
        if lookup("DATABASE_LOG_QUERIES").is_none() {
            database.log_queries = !is_prod;
        }

        Ok(Self {
            host: lookup("GATEWAY_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "GATEWAY_PORT", defaults.port)?,
            security: SecurityConfig::from_lookup(is_prod, &lookup)?,
            database,
            images_dir: lookup("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.images_dir),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            environment,
        })
    }

    pub fn is_prod(&self) -> bool {
        self.environment == PROD_ENV
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "dev".to_string(),
            database: DatabaseConfig::default(),
            security: SecurityConfig::new("", ""),
            images_dir: PathBuf::from("images"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
