//! Request error taxonomy.
//!
//! Every failed call is reported as one of six kinds. The UI maps kinds to
//! user-facing behavior; it never has to look at HTTP status codes.

use std::collections::BTreeMap;

use thiserror::Error;

use sb_core::error::SbError;

pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please check your connection and try again.";

pub const NETWORK_MESSAGE: &str = "Cannot connect to the server. Please check that:\n\
     1. The backend is running on port 8080\n\
     2. The device IP in the configuration matches your computer's IP\n\
     3. Your device and computer are on the same network and no firewall blocks the port";

pub const SERVER_ERROR_MESSAGE: &str = "The server encountered an error. Please try again later.";

pub const UNAUTHORIZED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Classified failure of an API call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received.
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Timeout(String),

    /// The server rejected the credentials; the local session has been cleared.
    #[error("{0}")]
    Unauthorized(String),

    /// Input was rejected, either locally or by the server, with per-field messages.
    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    #[error("{message}")]
    ServerError { status: u16, message: String },

    #[error("{message}")]
    Unknown {
        status: Option<u16>,
        message: String,
    },
}

/// Discriminant of [`ApiError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Network,
    Timeout,
    Unauthorized,
    Validation,
    ServerError,
    Unknown,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Network(_) => ApiErrorKind::Network,
            Self::Timeout(_) => ApiErrorKind::Timeout,
            Self::Unauthorized(_) => ApiErrorKind::Unauthorized,
            Self::Validation { .. } => ApiErrorKind::Validation,
            Self::ServerError { .. } => ApiErrorKind::ServerError,
            Self::Unknown { .. } => ApiErrorKind::Unknown,
        }
    }

    /// Whether repeating the same call may succeed. Advisory only.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Single-field validation error raised before any network call.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), message.clone());
        Self::Validation { message, fields }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status the error was derived from, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::ServerError { status, .. } => Some(*status),
            Self::Unknown { status, .. } => *status,
            _ => None,
        }
    }

    /// Per-field messages of a validation error.
    pub fn fields(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

impl From<SbError> for ApiError {
    fn from(e: SbError) -> Self {
        ApiError::unknown(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
