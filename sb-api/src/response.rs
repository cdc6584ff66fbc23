//! Response envelope.
//!
//! Every backend response is wrapped in a common envelope. Two backend
//! generations are in use and both decode into [`ApiEnvelope`]:
//! ```json
//! { "status": "OK", "code": 0, "data": { ... }, "message": "ok" }
//! { "success": false, "message": "Validation failed", "error": { "email": "..." } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `status` field: a numeric code or a Spring `HttpStatus` name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeStatus {
    Code(u16),
    Name(String),
}

impl EnvelopeStatus {
    /// Numeric status code, when it can be determined.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Name(name) => match name.to_ascii_uppercase().as_str() {
                "OK" => Some(200),
                "CREATED" => Some(201),
                "ACCEPTED" => Some(202),
                "NO_CONTENT" => Some(204),
                "BAD_REQUEST" => Some(400),
                "UNAUTHORIZED" => Some(401),
                "FORBIDDEN" => Some(403),
                "NOT_FOUND" => Some(404),
                "CONFLICT" => Some(409),
                "UNPROCESSABLE_ENTITY" => Some(422),
                "INTERNAL_SERVER_ERROR" => Some(500),
                other => other.parse().ok(),
            },
        }
    }
}

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T = serde_json::Value> {
    #[serde(default)]
    pub status: Option<EnvelopeStatus>,
    /// Application-level code.
    #[serde(default)]
    pub code: Option<i64>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    /// Field error map on validation failures; occasionally a plain string.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl<T> ApiEnvelope<T> {
    /// Envelope for a response that had no body.
    pub fn empty(status: u16) -> Self {
        Self {
            status: Some(EnvelopeStatus::Code(status)),
            code: None,
            data: None,
            message: None,
            success: None,
            error: None,
        }
    }

    /// Whether the envelope reports success.
    ///
    /// An explicit `success` flag wins; otherwise the status decides, and an
    /// envelope with neither counts as successful when it carries data.
    pub fn is_success(&self) -> bool {
        if let Some(success) = self.success {
            return success;
        }
        match self.status.as_ref().and_then(EnvelopeStatus::code) {
            Some(code) => (200..300).contains(&code),
            None => self.data.is_some(),
        }
    }

    /// Non-empty message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    /// Field error map, stringified. Empty when the envelope has none.
    pub fn error_fields(&self) -> BTreeMap<String, String> {
        match &self.error {
            Some(serde_json::Value::Object(map)) => map
                .iter()
                .map(|(field, value)| {
                    let message = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (field.clone(), message)
                })
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    /// Error text when `error` is a plain string.
    pub fn error_text(&self) -> Option<&str> {
        match &self.error {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Take the data, or `None` when the envelope has none.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
