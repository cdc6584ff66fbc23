//! StayBook API - HTTP client for the StayBook backend REST API.
//!
//! Provides the `ApiClient` with its request/response interceptors, the
//! six-way `ApiError` classification, the shared response envelope, and
//! typed endpoint methods for auth, users, hotels, rooms, provinces,
//! reviews, bookings and payment methods.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod interceptor;
pub mod response;

// Re-export key types
pub use client::{ApiClient, RequestOptions};
pub use endpoints::auth::RegisterRequest;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use interceptor::{RequestInterceptor, ResponseInterceptor, TransportOutcome};
pub use response::{ApiEnvelope, EnvelopeStatus};
