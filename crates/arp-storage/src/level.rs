//! Level storage provider trait.

use arp_model::{Level, LevelId};
use async_trait::async_trait;

use crate::error::StorageResult;

/// Provider for level lookups.
#[async_trait]
pub trait LevelProvider: Send + Sync {
    /// Gets a level by id.
    async fn get_level(&self, level: LevelId) -> StorageResult<Option<Level>>;
}
