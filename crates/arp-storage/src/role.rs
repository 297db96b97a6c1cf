//! Role storage provider trait.

use arp_model::Role;
use async_trait::async_trait;

use crate::error::StorageResult;

/// Provider for role lookups.
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Gets a role by key.
    async fn get_role(&self, role_key: &str) -> StorageResult<Option<Role>>;
}
