//! Session error types.

use arp_provisioning::ProvisioningError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session has been invalidated.
    #[error("Session closed: {0}")]
    Closed(Uuid),

    /// Provisioning the bound user failed.
    #[error("Provisioning failed: {0}")]
    Provisioning(#[from] ProvisioningError),
}

impl SessionError {
    /// Checks if this error comes from a closed session.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
