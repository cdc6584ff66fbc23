//! StayBook Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other StayBook crates:
//! - Application configuration (build mode, target platform, device IP, storage)
//! - Endpoint resolution for emulator, physical device, and production builds
//! - Infrastructure error types
//! - Structured logging with tracing
//! - Platform detection utilities
//! - Common constants

pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use endpoint::{BuildMode, EndpointConfig, EndpointResolver};
pub use error::{SbError, SbResult};
pub use logging::init_logging;
pub use platform::Platform;
