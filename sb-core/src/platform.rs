//! Target platform identification and OS-specific directories.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SbError, SbResult};

/// Deployment target the client is running on.
///
/// Only matters in development builds, where the emulator families reach the
/// host machine through different loopback addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android device or emulator.
    Android,
    /// iOS device or simulator.
    Ios,
    /// Anything else (desktop, web, tests).
    #[serde(other)]
    Other,
}

impl Platform {
    /// Detect the current platform at compile time.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Other
        }
    }

    /// Parse a platform identifier, falling back to `Other` for unknown values.
    pub fn from_identifier(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "android" => Platform::Android,
            "ios" => Platform::Ios,
            _ => Platform::Other,
        }
    }

    /// Get a human-readable platform name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Other => "other",
        }
    }

    /// Get the platform-specific application data directory.
    pub fn data_dir() -> SbResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| SbError::Config("could not determine data directory".into()))?;
        Ok(base.join("StayBook"))
    }

    /// Get the platform-specific configuration directory.
    pub fn config_dir() -> SbResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| SbError::Config("could not determine config directory".into()))?;
        Ok(base.join("StayBook"))
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl FromStr for Platform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_identifier(s))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
