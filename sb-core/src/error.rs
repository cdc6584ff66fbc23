//! Infrastructure error types for the StayBook client.
//!
//! Configuration, storage and I/O failures are unified into a single
//! `SbError` enum with conversions from underlying library errors. Request
//! failures have their own taxonomy in `sb-api`.

use thiserror::Error;

/// Convenience type alias for Results using SbError.
pub type SbResult<T> = Result<T, SbError>;

/// Unified infrastructure error type.
#[derive(Error, Debug)]
pub enum SbError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Storage errors --
    /// SQLite database error.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection pool error.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Key-value storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    // -- Network setup errors --
    /// The HTTP client could not be constructed.
    #[error("http client error: {0}")]
    Http(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for SbError {
    fn from(e: serde_json::Error) -> Self {
        SbError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for SbError {
    fn from(e: toml::de::Error) -> Self {
        SbError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sb_error_display() {
        let err = SbError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn test_from_serde_json() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: SbError = parse.unwrap_err().into();
        assert!(matches!(err, SbError::Serialization(_)));
    }
}
