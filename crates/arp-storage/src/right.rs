//! Right storage provider trait.

use arp_model::Right;
use async_trait::async_trait;

use crate::error::StorageResult;

/// Provider for right lookups.
#[async_trait]
pub trait RightProvider: Send + Sync {
    /// Gets a right by id.
    async fn get_right(&self, right_id: &str) -> StorageResult<Option<Right>>;
}
