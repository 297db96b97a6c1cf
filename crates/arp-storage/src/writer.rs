//! Level update capability.
//!
//! Changing a user's level has to go through the user store's full record
//! update. [`UserRecordWriter`] hides that detail behind a single
//! operation.

use std::sync::Arc;

use arp_model::{AdminUser, LevelId};
use async_trait::async_trait;

use crate::error::StorageResult;
use crate::user::{AdminUserRecord, PasswordUpdateMode, UserProvider};

/// Persists a new privilege level for a user.
#[async_trait]
pub trait UserRecordWriter: Send + Sync {
    /// Writes `level` as the user's stored level.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn update_level(&self, user: &AdminUser, level: LevelId) -> StorageResult<()>;
}

/// [`UserRecordWriter`] backed by a [`UserProvider`].
///
/// Copies every field of the user into an [`AdminUserRecord`], sets the
/// level and writes it with [`PasswordUpdateMode::Ignore`].
#[derive(Clone)]
pub struct ProviderLevelWriter {
    users: Arc<dyn UserProvider>,
}

impl ProviderLevelWriter {
    /// Creates a writer over the given user provider.
    #[must_use]
    pub fn new(users: Arc<dyn UserProvider>) -> Self {
        Self { users }
    }
}

impl std::fmt::Debug for ProviderLevelWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderLevelWriter").finish_non_exhaustive()
    }
}

#[async_trait]
impl UserRecordWriter for ProviderLevelWriter {
    async fn update_level(&self, user: &AdminUser, level: LevelId) -> StorageResult<()> {
        let mut record = AdminUserRecord::from(user);
        record.level = level;
        self.users.update(&record, PasswordUpdateMode::Ignore).await
    }
}
