//! Lifecycle interface shared by the long-lived services.

use sb_core::error::SbResult;

/// Lifecycle state of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Created,
    Initializing,
    Running,
    Stopped,
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Initializing => write!(f, "initializing"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Common lifecycle interface of StayBook services.
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    fn state(&self) -> ServiceState;

    /// Called once at application start.
    fn init(&mut self) -> SbResult<()>;

    fn shutdown(&mut self) -> SbResult<()>;

    /// Whether the service is operational.
    fn is_healthy(&self) -> bool {
        self.state() == ServiceState::Running
    }
}
