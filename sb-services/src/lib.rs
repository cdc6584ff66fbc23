//! StayBook Services - session management on top of the API client.
//!
//! - `SessionService`: login, registration, OTP verification, password
//!   reset and logout, driving the Anonymous/Authenticated state machine
//! - client-side validation that fails fast before any network call
//! - the `Service` lifecycle trait

pub mod service;
pub mod session;
pub mod validation;

// Re-export key types
pub use service::{Service, ServiceState};
pub use session::{RegisterOutcome, RegisterProfile, SessionService};
