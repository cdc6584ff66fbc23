//! Client-side input checks run before any auth call.
//!
//! Failures are reported as `ApiError::Validation` keyed by field name, the
//! same shape the backend uses, so callers handle both alike.

use lazy_static::lazy_static;
use regex::Regex;

use sb_api::{ApiError, ApiResult};
use sb_core::constants::{OTP_LEN, PASSWORD_MAX_LEN, PASSWORD_MIN_LEN};

lazy_static! {
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn validate_email(email: &str) -> ApiResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::invalid_field("email", "Email is required"));
    }
    if !EMAIL_SHAPE.is_match(email) {
        return Err(ApiError::invalid_field("email", "Invalid email format"));
    }
    Ok(())
}

/// Password length is counted in characters, not bytes.
pub fn validate_password(password: &str) -> ApiResult<()> {
    validate_password_field("password", password)
}

pub fn validate_new_password(password: &str) -> ApiResult<()> {
    validate_password_field("newPassword", password)
}

fn validate_password_field(field: &str, password: &str) -> ApiResult<()> {
    if password.is_empty() {
        return Err(ApiError::invalid_field(field, "Password is required"));
    }
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(ApiError::invalid_field(
            field,
            format!("Password must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn validate_full_name(name: &str) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::invalid_field("fullName", "Full name is required"));
    }
    Ok(())
}

pub fn validate_otp(otp: &str) -> ApiResult<()> {
    let otp = otp.trim();
    if otp.len() != OTP_LEN || !otp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::invalid_field(
            "otp",
            format!("OTP must be exactly {OTP_LEN} digits"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ApiError) -> String {
        err.fields()
            .and_then(|f| f.keys().next().cloned())
            .unwrap_or_default()
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("  lan.tran@mail.example.vn ").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.com").is_err());
        assert!(validate_email("a@@b.com").is_err());
        assert_eq!(field_of(validate_email("nope").unwrap_err()), "email");
    }

    #[test]
    fn test_password_bounds() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password(&"x".repeat(20)).is_ok());
        assert!(validate_password(&"x".repeat(21)).is_err());
        assert!(validate_password("").is_err());
        // six characters, twelve bytes
        assert!(validate_password("ậậậậậậ").is_ok());
        assert_eq!(field_of(validate_new_password("1").unwrap_err()), "newPassword");
    }

    #[test]
    fn test_otp() {
        assert!(validate_otp("123456").is_ok());
        assert!(validate_otp("12345").is_err());
        assert!(validate_otp("1234567").is_err());
        assert!(validate_otp("12a456").is_err());
        assert!(validate_otp("١٢٣٤٥٦").is_err());
    }

    #[test]
    fn test_full_name() {
        assert!(validate_full_name("Lan").is_ok());
        assert_eq!(field_of(validate_full_name("   ").unwrap_err()), "fullName");
    }
}
