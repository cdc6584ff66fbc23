//! Base URL resolution for API calls.
//!
//! The backend is reached differently depending on how the client was built
//! and where it runs: production builds always use the fixed production URL,
//! development builds use a configured device IP (physical device on the same
//! network) or the loopback address appropriate for the emulator family.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::constants;
use crate::platform::Platform;

/// Whether the client was built for development or production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[serde(alias = "dev", alias = "debug")]
    Development,
    #[serde(alias = "prod", alias = "release")]
    Production,
}

impl BuildMode {
    /// Build mode of the running binary.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    pub fn is_development(&self) -> bool {
        *self == BuildMode::Development
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::current()
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" | "debug" => Ok(BuildMode::Development),
            "prod" | "production" | "release" => Ok(BuildMode::Production),
            other => Err(format!("unknown build mode: {other}")),
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Development => write!(f, "development"),
            BuildMode::Production => write!(f, "production"),
        }
    }
}

/// Resolved network settings for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Base URL without a trailing slash (e.g. "http://10.0.2.2:8080/api/v1").
    pub base_url: String,
    /// Default request timeout. Always non-zero.
    pub timeout: Duration,
}

impl EndpointConfig {
    /// Create an endpoint config, normalizing the URL and timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let timeout = if timeout.is_zero() {
            Duration::from_millis(constants::DEFAULT_API_TIMEOUT_MS)
        } else {
            timeout
        };
        Self { base_url, timeout }
    }

    /// Join an API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Decides the base URL from build mode, platform and device IP override.
pub struct EndpointResolver;

impl EndpointResolver {
    /// Resolve the base URL. Never fails; unknown platforms get the localhost default.
    pub fn resolve(build_mode: BuildMode, platform: Platform, device_ip: Option<&str>) -> EndpointConfig {
        let timeout = Duration::from_millis(constants::DEFAULT_API_TIMEOUT_MS);
        EndpointConfig::new(
            Self::base_url(build_mode, platform, device_ip, constants::DEFAULT_PRODUCTION_URL),
            timeout,
        )
    }

    /// Resolve from the `[api]` configuration section.
    pub fn from_config(config: &ApiConfig) -> EndpointConfig {
        let production_url = if config.production_url.trim().is_empty() {
            constants::DEFAULT_PRODUCTION_URL
        } else {
            config.production_url.as_str()
        };
        EndpointConfig::new(
            Self::base_url(
                config.build_mode,
                config.platform,
                config.device_ip.as_deref(),
                production_url,
            ),
            Duration::from_millis(config.timeout_ms),
        )
    }

    fn base_url(
        build_mode: BuildMode,
        platform: Platform,
        device_ip: Option<&str>,
        production_url: &str,
    ) -> String {
        if !build_mode.is_development() {
            debug!("using production API url");
            return production_url.to_string();
        }

        if let Some(ip) = device_ip.map(str::trim).filter(|ip| !ip.is_empty()) {
            debug!("using physical device IP {ip}");
            return dev_url(ip);
        }

        match platform {
            Platform::Android => {
                debug!("using android emulator host {}", constants::ANDROID_EMULATOR_HOST);
                dev_url(constants::ANDROID_EMULATOR_HOST)
            }
            Platform::Ios => {
                debug!("using ios simulator host {}", constants::LOCALHOST);
                dev_url(constants::LOCALHOST)
            }
            Platform::Other => {
                debug!("using default host {}", constants::LOCALHOST);
                dev_url(constants::LOCALHOST)
            }
        }
    }
}

fn dev_url(host: &str) -> String {
    format!(
        "http://{host}:{}{}",
        constants::API_PORT,
        constants::API_PATH_PREFIX
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PLATFORMS: [Platform; 3] = [Platform::Android, Platform::Ios, Platform::Other];

    #[test]
    fn test_device_ip_wins_on_every_platform() {
        for platform in ALL_PLATFORMS {
            let cfg = EndpointResolver::resolve(BuildMode::Development, platform, Some("192.168.2.180"));
            assert_eq!(cfg.base_url, "http://192.168.2.180:8080/api/v1");
        }
    }

    #[test]
    fn test_device_ip_is_trimmed() {
        let cfg = EndpointResolver::resolve(BuildMode::Development, Platform::Ios, Some("  10.1.1.5 "));
        assert_eq!(cfg.base_url, "http://10.1.1.5:8080/api/v1");
    }

    #[test]
    fn test_blank_device_ip_falls_back_to_platform_default() {
        let cfg = EndpointResolver::resolve(BuildMode::Development, Platform::Android, Some("   "));
        assert_eq!(cfg.base_url, "http://10.0.2.2:8080/api/v1");
    }

    #[test]
    fn test_platform_defaults() {
        let android = EndpointResolver::resolve(BuildMode::Development, Platform::Android, None);
        let ios = EndpointResolver::resolve(BuildMode::Development, Platform::Ios, None);
        let other = EndpointResolver::resolve(BuildMode::Development, Platform::Other, None);
        assert_eq!(android.base_url, "http://10.0.2.2:8080/api/v1");
        assert_eq!(ios.base_url, "http://localhost:8080/api/v1");
        assert_eq!(other.base_url, ios.base_url);
    }

    #[test]
    fn test_production_ignores_device_ip() {
        for platform in ALL_PLATFORMS {
            let cfg = EndpointResolver::resolve(BuildMode::Production, platform, Some("192.168.1.9"));
            assert_eq!(cfg.base_url, constants::DEFAULT_PRODUCTION_URL);
        }
    }

    #[test]
    fn test_endpoint_config_normalizes() {
        let cfg = EndpointConfig::new("http://example.com/api/v1///", Duration::ZERO);
        assert_eq!(cfg.base_url, "http://example.com/api/v1");
        assert_eq!(cfg.timeout, Duration::from_millis(constants::DEFAULT_API_TIMEOUT_MS));
        assert_eq!(cfg.url("/hotels"), "http://example.com/api/v1/hotels");
        assert_eq!(cfg.url("hotels/best"), "http://example.com/api/v1/hotels/best");
    }

    #[test]
    fn test_from_config_uses_custom_production_url() {
        let config = ApiConfig {
            build_mode: BuildMode::Production,
            production_url: "https://api.staybook.example/api/v1/".into(),
            timeout_ms: 10_000,
            ..ApiConfig::default()
        };
        let cfg = EndpointResolver::from_config(&config);
        assert_eq!(cfg.base_url, "https://api.staybook.example/api/v1");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_build_mode_parse() {
        assert_eq!("dev".parse::<BuildMode>().unwrap(), BuildMode::Development);
        assert_eq!("Production".parse::<BuildMode>().unwrap(), BuildMode::Production);
        assert!("staging".parse::<BuildMode>().is_err());
    }
}
