//! Provisioning error types.

use arp_model::UserId;
use arp_storage::StorageError;
use thiserror::Error;

/// Errors that can occur while provisioning a user.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The user to update no longer exists in the store.
    #[error("admin user not found: {0}")]
    UserNotFound(UserId),

    /// A store call failed; earlier additions stay in place.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for provisioning operations.
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;
