//! Typed endpoint methods, one module per resource.

pub mod auth;
pub mod bookings;
pub mod hotels;
pub mod payment_methods;
pub mod provinces;
pub mod reviews;
pub mod rooms;
pub mod users;

use crate::error::{ApiError, ApiResult};
use crate::response::ApiEnvelope;

/// Data of a list endpoint. "No data" answers read as an empty list.
pub(crate) fn list<T>(envelope: ApiEnvelope<Vec<T>>) -> Vec<T> {
    envelope.into_data().unwrap_or_default()
}

/// Data of a single-resource endpoint; missing data is an error.
pub(crate) fn single<T>(envelope: ApiEnvelope<T>, what: &str) -> ApiResult<T> {
    let message = envelope
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{what} not found"));
    envelope.into_data().ok_or_else(|| ApiError::unknown(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;

    #[test]
    fn test_list_without_data_is_empty() {
        let env: ApiEnvelope<Vec<i64>> =
            serde_json::from_str(r#"{"success":false,"message":"No data","data":null}"#).unwrap();
        assert!(list(env).is_empty());
    }

    #[test]
    fn test_single_without_data_is_unknown() {
        let env: ApiEnvelope<i64> = serde_json::from_str(r#"{"status":200,"data":null}"#).unwrap();
        let err = single(env, "hotel").unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Unknown);
        assert_eq!(err.to_string(), "hotel not found");

        let env: ApiEnvelope<i64> = serde_json::from_str(r#"{"status":200,"data":3}"#).unwrap();
        assert_eq!(single(env, "hotel").unwrap(), 3);
    }
}
