//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "StayBook";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port the backend API listens on in development.
pub const API_PORT: u16 = 8080;

/// Path prefix of every REST endpoint.
pub const API_PATH_PREFIX: &str = "/api/v1";

/// Base URL used by production builds.
pub const DEFAULT_PRODUCTION_URL: &str = "http://your-api-url.com/api/v1";

/// Loopback alias the Android emulator uses to reach the host machine.
pub const ANDROID_EMULATOR_HOST: &str = "10.0.2.2";

/// Plain loopback host for the iOS simulator and everything else.
pub const LOCALHOST: &str = "localhost";

/// Default API request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// TCP connect timeout of the shared HTTP client, in milliseconds. Applies
/// to every request; the per-request timeout still bounds the whole call.
pub const CONNECT_TIMEOUT_MS: u64 = 15_000;

/// Timeout for the `/health` connectivity check, in milliseconds.
pub const HEALTH_CHECK_TIMEOUT_MS: u64 = 5_000;

/// Timeout for the best-effort server logout call, in milliseconds.
pub const LOGOUT_TIMEOUT_MS: u64 = 5_000;

/// Password length bounds accepted by the backend.
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 20;

/// Number of digits in an email verification code.
pub const OTP_LEN: usize = 6;

/// Persisted key-value entries.
pub mod storage_keys {
    /// Session bearer token (raw string).
    pub const AUTH_TOKEN: &str = "@auth_token";
    /// Session identity snapshot (JSON).
    pub const AUTH_USER: &str = "@auth_user";

    /// Selected stay date range, written by the UI.
    pub const RANGE_DATE: &str = "rangeDate";
    /// Guest counts, written by the UI.
    pub const PEOPLE: &str = "people";
    /// Pending total price, written by the UI.
    pub const TOTAL_PRICE: &str = "totalPrice";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_bounds() {
        assert!(PASSWORD_MIN_LEN < PASSWORD_MAX_LEN);
    }

    #[test]
    fn test_connect_timeout_within_request_timeout() {
        assert!(CONNECT_TIMEOUT_MS <= DEFAULT_API_TIMEOUT_MS);
    }

    #[test]
    fn test_session_keys_distinct() {
        assert_ne!(storage_keys::AUTH_TOKEN, storage_keys::AUTH_USER);
    }
}
