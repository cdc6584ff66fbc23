//! Auth endpoints.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use sb_core::constants;
use sb_models::AuthPayload;

use crate::client::{ApiClient, Auth, RequestOptions};
use crate::error::ApiResult;
use crate::response::ApiEnvelope;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`.
///
/// Carries the name both whole and split, and the phone under both keys, so
/// either backend generation can read it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn new(full_name: &str, email: &str, password: &str, phone: Option<&str>) -> Self {
        let full_name = full_name.trim().to_string();
        let (first_name, last_name) = match full_name.split_once(' ') {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (full_name.clone(), String::new()),
        };
        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        Self {
            full_name,
            first_name,
            last_name,
            email: email.trim().to_string(),
            password: password.to_string(),
            phone_number: phone.clone(),
            phone,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    pub purpose: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    pub new_password: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a token. Sent without auth.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<ApiEnvelope<AuthPayload>> {
        let body = LoginRequest { email, password };
        self.post_json("/auth/login", &body, &RequestOptions::anonymous())
            .await
    }

    /// Create an account. The payload has a token only when the account is active.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<ApiEnvelope<AuthPayload>> {
        self.post_json("/auth/register", request, &RequestOptions::anonymous())
            .await
    }

    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        purpose: &str,
    ) -> ApiResult<ApiEnvelope<serde_json::Value>> {
        let body = VerifyOtpRequest { email, otp, purpose };
        self.post_json("/auth/verify-otp", &body, &RequestOptions::anonymous())
            .await
    }

    /// Ask the backend to mail a password reset code.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<ApiEnvelope<serde_json::Value>> {
        let body = serde_json::json!({ "email": email });
        self.post_json("/auth/forgot-password", &body, &RequestOptions::anonymous())
            .await
    }

    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> ApiResult<ApiEnvelope<serde_json::Value>> {
        let body = ResetPasswordRequest {
            email,
            otp,
            new_password,
        };
        self.post_json("/auth/reset-password", &body, &RequestOptions::anonymous())
            .await
    }

    /// Tell the server a token is no longer used.
    ///
    /// The token is passed explicitly since the local store is already
    /// cleared when this runs. Never waits longer than the configured
    /// timeout or five seconds, whichever is shorter.
    pub async fn logout_session(&self, token: &str) -> ApiResult<()> {
        let timeout = Duration::from_millis(constants::LOGOUT_TIMEOUT_MS).min(self.timeout());
        let options = RequestOptions::default().with_timeout(timeout);
        let _: ApiEnvelope<serde_json::Value> = self
            .send(Method::POST, "/auth/logout", None, &options, Auth::Bearer(token))
            .await?;
        Ok(())
    }
}
