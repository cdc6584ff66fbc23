//! Application configuration management.
//!
//! Handles loading, saving, and accessing the client configuration: build
//! mode, target platform, device IP override, storage location and logging.
//! Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::endpoint::BuildMode;
use crate::error::{SbError, SbResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// API endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Development or production build.
    #[serde(default)]
    pub build_mode: BuildMode,

    /// Deployment target; selects the emulator loopback address.
    #[serde(default)]
    pub platform: Platform,

    /// IP of the development machine when testing from a physical device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_ip: Option<String>,

    /// Base URL used by production builds.
    #[serde(default = "default_production_url")]
    pub production_url: String,

    /// API request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub timeout_ms: u64,
}

/// Local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file. If empty, uses default location.
    #[serde(default)]
    pub path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_production_url() -> String {
    constants::DEFAULT_PRODUCTION_URL.to_string()
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

fn default_pool_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            build_mode: BuildMode::default(),
            platform: Platform::default(),
            device_ip: None,
            production_url: default_production_url(),
            timeout_ms: default_api_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            wal_mode: true,
            pool_size: default_pool_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> SbResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> SbResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&contents)?;
        config.api.device_ip = config
            .api
            .device_ip
            .as_deref()
            .and_then(Self::sanitize_device_ip);
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> SbResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| SbError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> SbResult<PathBuf> {
        Ok(Platform::config_dir()?.join("config.toml"))
    }

    /// Get the effective database path, using the configured path or the default.
    pub fn effective_db_path(&self) -> SbResult<PathBuf> {
        if self.storage.path.is_empty() {
            Ok(Platform::data_dir()?.join("staybook.db"))
        } else {
            Ok(PathBuf::from(&self.storage.path))
        }
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> SbResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(Platform::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Normalize a device IP override.
    ///
    /// Strips whitespace, quotes, a scheme and any port or path so that only
    /// the host remains. Returns `None` for an empty override.
    pub fn sanitize_device_ip(raw: &str) -> Option<String> {
        let trimmed = raw.trim().trim_matches('"').trim();
        let without_scheme = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .unwrap_or(trimmed);
        let host = without_scheme
            .split(['/', ':'])
            .next()
            .unwrap_or_default()
            .trim();
        if host.is_empty() {
            None
        } else {
            Some(host.to_string())
        }
    }
}
