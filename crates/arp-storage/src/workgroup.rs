//! Workgroup storage provider trait.

use std::collections::BTreeSet;

use arp_model::{UserId, WorkgroupKey};
use async_trait::async_trait;

use crate::error::StorageResult;

/// Provider for workgroups and their memberships.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait WorkgroupProvider: Send + Sync {
    /// Checks whether a workgroup exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Adds a user to a workgroup.
    ///
    /// Adding an existing member is a no-op.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the workgroup doesn't exist.
    async fn add_user(&self, user_id: UserId, key: &str) -> StorageResult<()>;

    /// Gets the workgroups a user belongs to.
    async fn get_user_workgroups(&self, user_id: UserId) -> StorageResult<BTreeSet<WorkgroupKey>>;
}
