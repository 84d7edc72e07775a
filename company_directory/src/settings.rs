//! Configuration loading with environment variable support and validation.

use anyhow::{anyhow, Result};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub max_request_size_mb: usize,
    pub rate_limit_per_minute: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: false,
            cors_origins: vec!["*".to_string()],
            max_request_size_mb: 1,
            rate_limit_per_minute: 600,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Location of the company document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub json_file_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            json_file_path: PathBuf::from("data/companies.json"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub data: DataConfig,
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name("companies").required(false))
            // e.g. COMPANY__SERVER__PORT=9000
            .add_source(
                Environment::with_prefix("COMPANY")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        settings.apply_env_overrides()?;
        settings.validate()?;

        Ok(settings)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("COMPANY_JSON_FILEPATH") {
            self.data.json_file_path = PathBuf::from(path);
        }
        if let Ok(host) = std::env::var("COMPANY_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("COMPANY_SERVER_PORT") {
            self.server.port = port.parse()?;
        }
        Ok(())
    }

    /// Validate settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("Server port cannot be 0"));
        }
        if self.server.rate_limit_per_minute == 0 {
            return Err(anyhow!("Rate limit must allow at least one request per minute"));
        }
        if self.server.max_request_size_mb == 0 {
            return Err(anyhow!("Max request size cannot be 0"));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(anyhow!("Unknown log format: {}", self.logging.format));
        }

        if self.data.json_file_path.as_os_str().is_empty() {
            return Err(anyhow!("Company JSON file path cannot be empty"));
        }

        Ok(())
    }

    /// Warn when the configured document is missing. Call once logging is up.
    pub fn check_data_file(&self) -> bool {
        let exists = self.data.json_file_path.exists();
        if !exists {
            warn!("Company JSON file does not exist: {:?}", self.data.json_file_path);
        }
        exists
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
