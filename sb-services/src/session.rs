//! Session service: login, registration, OTP flows and logout.
//!
//! Owns the Anonymous/Authenticated state machine. Sessions are created on a
//! successful login or an active registration and destroyed on logout; the
//! response interceptor destroys them on a 401 without going through here.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use sb_api::{ApiClient, ApiEnvelope, ApiError, ApiResult, RegisterRequest};
use sb_core::error::SbResult;
use sb_models::{Session, SessionState, TokenStore};

use crate::service::{Service, ServiceState};
use crate::validation;

/// OTP purpose the backend expects for account activation.
pub const REGISTER_OTP_PURPOSE: &str = "REGISTER";

/// Input of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Result of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The account is active and signed in.
    Active(Session),
    /// The account exists but must be activated with an emailed OTP.
    PendingVerification { email: String, message: String },
}

/// Service for the authenticated session.
#[derive(Clone)]
pub struct SessionService {
    state: ServiceState,
    api: ApiClient,
    tokens: TokenStore,
}

impl SessionService {
    /// Create a session service over the client's token store.
    pub fn new(api: ApiClient) -> Self {
        let tokens = api.tokens().clone();
        Self {
            state: ServiceState::Created,
            api,
            tokens,
        }
    }

    /// Sign in. Invalid input fails before any request is sent.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let email = email.trim();
        validation::validate_email(email)?;
        validation::validate_password(password)?;

        let resp = self.api.login(email, password).await?;
        let message = resp.message().map(str::to_string);
        let session = resp
            .into_data()
            .and_then(|payload| payload.into_session(email))
            .ok_or_else(|| {
                ApiError::unknown(
                    message.unwrap_or_else(|| "Login response did not contain a session".into()),
                )
            })?;

        self.tokens.save(&session)?;
        info!("logged in as user {}", session.user_id());
        Ok(session)
    }

    /// Create an account. Signs in when the backend returns a token.
    pub async fn register(&self, profile: &RegisterProfile) -> ApiResult<RegisterOutcome> {
        validation::validate_full_name(&profile.full_name)?;
        validation::validate_email(&profile.email)?;
        validation::validate_password(&profile.password)?;

        let request = RegisterRequest::new(
            &profile.full_name,
            &profile.email,
            &profile.password,
            profile.phone_number.as_deref(),
        );
        let resp = self.api.register(&request).await?;
        let message = resp
            .message()
            .unwrap_or("Registration successful. Please verify your email.")
            .to_string();

        match resp.into_data().and_then(|payload| payload.into_session(&request.email)) {
            Some(session) => {
                self.tokens.save(&session)?;
                info!("registered and logged in as user {}", session.user_id());
                Ok(RegisterOutcome::Active(session))
            }
            None => {
                info!("registration pending verification");
                Ok(RegisterOutcome::PendingVerification {
                    email: request.email,
                    message,
                })
            }
        }
    }

    /// Activate a pending account with the emailed code.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> ApiResult<String> {
        let email = email.trim();
        validation::validate_email(email)?;
        validation::validate_otp(otp)?;

        let resp = self
            .api
            .verify_otp(email, otp.trim(), REGISTER_OTP_PURPOSE)
            .await?;
        Ok(ack_message(resp, "OTP verified successfully"))
    }

    /// Request a password reset code by email.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<String> {
        let email = email.trim();
        validation::validate_email(email)?;

        let resp = self.api.forgot_password(email).await?;
        Ok(ack_message(resp, "Password reset email sent successfully"))
    }

    /// Set a new password using an emailed reset code.
    pub async fn reset_password(&self, email: &str, otp: &str, new_password: &str) -> ApiResult<String> {
        let email = email.trim();
        validation::validate_email(email)?;
        validation::validate_otp(otp)?;
        validation::validate_new_password(new_password)?;

        let resp = self
            .api
            .reset_password(email, otp.trim(), new_password)
            .await?;
        Ok(ack_message(resp, "Password reset successfully"))
    }

    /// Sign out.
    ///
    /// The local session is cleared first and unconditionally; the server
    /// is then told on a best-effort basis and its answer is ignored.
    pub async fn logout(&self) -> SbResult<()> {
        let token = match self.tokens.token() {
            Ok(token) => token,
            Err(e) => {
                warn!("could not read session token before logout: {}", e);
                None
            }
        };

        let cleared = self.tokens.clear();
        info!("logged out");

        if let Some(token) = token {
            if let Err(e) = self.api.logout_session(&token).await {
                debug!("server logout failed (ignored): {}", e);
            }
        }

        cleared
    }

    /// Session persisted by an earlier run, if any.
    pub fn restore(&self) -> Option<Session> {
        let session = self.tokens.load();
        match &session {
            Some(s) => info!("restored session for user {}", s.user_id()),
            None => debug!("no session to restore"),
        }
        session
    }

    pub fn current_session(&self) -> Option<Session> {
        self.tokens.load()
    }

    /// Current session state. `Service::state` reports the service lifecycle instead.
    pub fn state(&self) -> SessionState {
        self.tokens.state()
    }

    /// Subscribe to Anonymous/Authenticated transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tokens.subscribe()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl Service for SessionService {
    fn name(&self) -> &str {
        "session"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> SbResult<()> {
        self.state = ServiceState::Initializing;
        self.restore();
        self.state = ServiceState::Running;
        debug!("{} service {}", self.name(), self.state);
        Ok(())
    }

    fn shutdown(&mut self) -> SbResult<()> {
        self.state = ServiceState::Stopped;
        debug!("{} service {}", self.name(), self.state);
        Ok(())
    }
}

/// Confirmation text of an acknowledgement-only endpoint.
fn ack_message(resp: ApiEnvelope<serde_json::Value>, fallback: &str) -> String {
    if let Some(message) = resp.message() {
        return message.to_string();
    }
    match resp.into_data() {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use sb_api::ApiErrorKind;
    use sb_core::endpoint::{BuildMode, EndpointConfig};

    /// Points at a port nothing listens on; any request would fail with Network.
    fn offline_service() -> SessionService {
        let api = ApiClient::new(
            EndpointConfig::new("http://127.0.0.1:9/api/v1", Duration::from_millis(200)),
            TokenStore::in_memory(),
            BuildMode::Production,
        )
        .unwrap();
        SessionService::new(api)
    }

    #[tokio::test]
    async fn test_login_fast_fails_on_bad_input() {
        let svc = offline_service();
        for (email, password) in [("", "secret1"), ("not-an-email", "secret1"), ("a@b.com", "123"), ("a@b.com", "")] {
            let err = svc.login(email, password).await.unwrap_err();
            assert_eq!(err.kind(), ApiErrorKind::Validation, "{email}/{password}");
        }
    }

    #[tokio::test]
    async fn test_register_fast_fails_on_bad_input() {
        let svc = offline_service();
        let profile = RegisterProfile {
            full_name: " ".into(),
            email: "a@b.com".into(),
            password: "secret1".into(),
            phone_number: None,
        };
        let err = svc.register(&profile).await.unwrap_err();
        assert_eq!(err.fields().unwrap().keys().next().map(String::as_str), Some("fullName"));
    }

    #[tokio::test]
    async fn test_otp_fast_fails() {
        let svc = offline_service();
        let err = svc.verify_otp("a@b.com", "12ab56").await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        let err = svc.reset_password("a@b.com", "123456", "short").await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_logout_without_session_is_local_noop() {
        let svc = offline_service();
        svc.logout().await.unwrap();
        assert_eq!(svc.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_service_lifecycle() {
        let mut svc = offline_service();
        assert!(!svc.is_healthy());
        svc.init().unwrap();
        assert!(svc.is_healthy());
        svc.shutdown().unwrap();
        assert_eq!(Service::state(&svc), ServiceState::Stopped);
    }

    #[test]
    fn test_ack_message() {
        let env: ApiEnvelope = serde_json::from_str(r#"{"status":"OK","data":"sent"}"#).unwrap();
        assert_eq!(ack_message(env, "fallback"), "sent");
        let env: ApiEnvelope =
            serde_json::from_str(r#"{"status":"OK","message":"OTP verified successfully"}"#).unwrap();
        assert_eq!(ack_message(env, "fallback"), "OTP verified successfully");
        let env: ApiEnvelope = ApiEnvelope::empty(204);
        assert_eq!(ack_message(env, "fallback"), "fallback");
    }
}
