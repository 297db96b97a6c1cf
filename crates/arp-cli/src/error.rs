//! CLI error types.

use arp_provisioning::ProvisioningError;
use arp_session::SessionError;
use arp_storage::StorageError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] arp_core::Error),

    /// Directory store error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Provisioning error.
    #[error("provisioning error: {0}")]
    Provisioning(#[from] ProvisioningError),

    /// Session error.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Resource not found.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
