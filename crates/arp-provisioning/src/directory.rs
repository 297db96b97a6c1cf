//! The set of stores the provisioning service works against.

use std::sync::Arc;

use arp_storage::{
    InMemoryDirectory, LevelProvider, ProviderLevelWriter, RightProvider, RoleProvider,
    UserProvider, UserRecordWriter, WorkgroupProvider,
};

/// Handles to every store the service needs.
#[derive(Clone)]
pub struct Directory {
    /// Admin users and their right/role grants.
    pub users: Arc<dyn UserProvider>,
    /// Rights.
    pub rights: Arc<dyn RightProvider>,
    /// Roles.
    pub roles: Arc<dyn RoleProvider>,
    /// Levels.
    pub levels: Arc<dyn LevelProvider>,
    /// Workgroups and memberships.
    pub workgroups: Arc<dyn WorkgroupProvider>,
    /// Level writes.
    pub level_writer: Arc<dyn UserRecordWriter>,
}

impl Directory {
    /// Uses one in-memory directory for every store.
    #[must_use]
    pub fn in_memory(store: Arc<InMemoryDirectory>) -> Self {
        Self {
            users: store.clone(),
            rights: store.clone(),
            roles: store.clone(),
            levels: store.clone(),
            workgroups: store.clone(),
            level_writer: Arc::new(ProviderLevelWriter::new(store)),
        }
    }
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory").finish_non_exhaustive()
    }
}
