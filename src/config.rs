//! Configuration management for the weather tool server
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherServerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the weather tool server
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Upstream weather API configuration
    pub upstream: UpstreamConfig,
    /// Response cache configuration
    pub cache: CacheConfig,
    /// HTTP listener configuration
    pub listen: ListenConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream weather API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL for the weather API
    pub base_url: String,
    /// User-Agent header sent with every upstream request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache TTL in seconds
    pub ttl_seconds: u64,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "weather-mcp-server/2.0".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 300 }
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::default_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. WEATHERGOV_UPSTREAM__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("WEATHERGOV")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: ServerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weathergov-server").join("config.toml"))
    }

    /// Bind address in `host:port` form
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen.host, self.listen.port)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.upstream.base_url.is_empty() {
            return Err(
                WeatherServerError::config("Upstream base URL cannot be empty").into(),
            );
        }

        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(WeatherServerError::config(format!(
                "Upstream base URL must start with http:// or https://, got: {}",
                self.upstream.base_url
            ))
            .into());
        }

        if self.upstream.user_agent.is_empty() {
            return Err(WeatherServerError::config("User agent cannot be empty").into());
        }

        if self.upstream.timeout_seconds == 0 {
            return Err(
                WeatherServerError::config("Request timeout must be at least 1 second").into(),
            );
        }

        if self.cache.ttl_seconds == 0 {
            return Err(
                WeatherServerError::config("Cache TTL must be at least 1 second").into(),
            );
        }

        if self.listen.host.is_empty() {
            return Err(WeatherServerError::config("Listen host cannot be empty").into());
        }

        Ok(())
    }
}
