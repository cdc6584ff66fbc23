//! Request and response interceptors.
//!
//! The request side attaches the bearer token. The response side turns the
//! raw outcome of a round trip into either the response body or a classified
//! [`ApiError`], clearing the stored session when the server answers 401.

use reqwest::RequestBuilder;
use tracing::{debug, error, warn};

use sb_core::endpoint::BuildMode;
use sb_models::TokenStore;

use crate::error::{
    ApiError, ApiResult, NETWORK_MESSAGE, SERVER_ERROR_MESSAGE, TIMEOUT_MESSAGE,
    UNAUTHORIZED_MESSAGE,
};
use crate::response::ApiEnvelope;

/// Raw result of one round trip, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    /// The server answered.
    Response { status: u16, body: String },
    /// No answer within the timeout.
    TimedOut,
    /// No response reached the client: refused, reset or closed before a
    /// status line arrived.
    Unreachable(String),
    /// Any other transport failure (request building, redirects, body decoding).
    Failed(String),
}

impl TransportOutcome {
    /// Map a reqwest error to an outcome.
    pub fn from_error(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::TimedOut
        } else if e.status().is_none() && (e.is_connect() || e.is_request()) {
            Self::Unreachable(error_chain(e))
        } else {
            Self::Failed(error_chain(e))
        }
    }
}

/// Display of an error followed by its sources, joined with ": ".
fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Attaches `Authorization: Bearer <token>` when a session exists.
#[derive(Clone, Debug)]
pub struct RequestInterceptor {
    tokens: TokenStore,
}

impl RequestInterceptor {
    pub fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    /// Decorate an outgoing request. A failed token read leaves it unauthenticated.
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.token() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                warn!("could not read session token, sending without auth: {}", e);
                builder
            }
        }
    }
}

/// Classifies transport outcomes into bodies or [`ApiError`]s.
#[derive(Clone, Debug)]
pub struct ResponseInterceptor {
    tokens: TokenStore,
    build_mode: BuildMode,
}

impl ResponseInterceptor {
    pub fn new(tokens: TokenStore, build_mode: BuildMode) -> Self {
        Self { tokens, build_mode }
    }

    /// Classify an outcome. Returns `(status, body)` for 2xx responses.
    ///
    /// A 401 clears the stored session before the error is returned.
    pub fn classify(&self, outcome: TransportOutcome) -> ApiResult<(u16, String)> {
        let err = match outcome {
            TransportOutcome::Response { status, body } if (200..300).contains(&status) => {
                return Ok((status, body));
            }
            TransportOutcome::Response { status, body } => self.classify_status(status, &body),
            TransportOutcome::TimedOut => ApiError::Timeout(TIMEOUT_MESSAGE.to_string()),
            TransportOutcome::Unreachable(detail) => {
                debug!("server unreachable: {}", detail);
                ApiError::Network(NETWORK_MESSAGE.to_string())
            }
            TransportOutcome::Failed(detail) => ApiError::unknown(detail),
        };

        self.log_error(&err);
        Err(err)
    }

    fn classify_status(&self, status: u16, body: &str) -> ApiError {
        let envelope = serde_json::from_str::<ApiEnvelope>(body).ok();
        let message = envelope
            .as_ref()
            .and_then(|env| env.message().or_else(|| env.error_text()))
            .map(str::to_string);

        if status == 401 {
            if let Err(e) = self.tokens.clear() {
                warn!("failed to clear session after 401: {}", e);
            }
            return ApiError::Unauthorized(message.unwrap_or_else(|| UNAUTHORIZED_MESSAGE.into()));
        }

        if (400..500).contains(&status) {
            let fields = envelope
                .as_ref()
                .map(ApiEnvelope::error_fields)
                .unwrap_or_default();
            if !fields.is_empty() {
                return ApiError::Validation {
                    message: message.unwrap_or_else(|| "Validation failed".into()),
                    fields,
                };
            }
        }

        if status >= 500 {
            return ApiError::ServerError {
                status,
                message: message.unwrap_or_else(|| SERVER_ERROR_MESSAGE.into()),
            };
        }

        let message = message.unwrap_or_else(|| {
            let text = body.trim();
            if text.is_empty() {
                format!("Request failed with status code {status}")
            } else {
                text.to_string()
            }
        });
        ApiError::Unknown {
            status: Some(status),
            message,
        }
    }

    fn log_error(&self, err: &ApiError) {
        if !self.build_mode.is_development() {
            return;
        }
        match err {
            ApiError::ServerError { status, message } => {
                error!("API error: status={} message={}", status, message)
            }
            ApiError::Unauthorized(message) => error!("API error: status=401 message={}", message),
            ApiError::Network(_) => error!("API error: no response from server"),
            _ => {}
        }
    }
}
