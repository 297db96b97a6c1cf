//! In-memory directory.
//!
//! Implements every provider trait over a single locked map set. The CLI
//! loads it from a seed file; tests build it programmatically.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use arp_model::{
    AdminUser, Level, LevelId, Right, RightId, Role, RoleKey, UserId, Workgroup, WorkgroupKey,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};
use crate::level::LevelProvider;
use crate::right::RightProvider;
use crate::role::RoleProvider;
use crate::user::{AdminUserRecord, PasswordUpdateMode, UserProvider};
use crate::workgroup::WorkgroupProvider;

/// Serializable contents of a directory.
///
/// Users carry their assignments inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySeed {
    /// Admin users.
    #[serde(default)]
    pub users: Vec<AdminUser>,
    /// Known rights.
    #[serde(default)]
    pub rights: Vec<Right>,
    /// Known roles.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Known workgroups.
    #[serde(default)]
    pub workgroups: Vec<Workgroup>,
    /// Known levels.
    #[serde(default)]
    pub levels: Vec<Level>,
}

impl DirectorySeed {
    /// Parses a JSON seed.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Serialization` on malformed input.
    pub fn from_json(text: &str) -> StorageResult<Self> {
        serde_json::from_str(text).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Parses a TOML seed.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Serialization` on malformed input.
    pub fn from_toml(text: &str) -> StorageResult<Self> {
        toml::from_str(text).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Reads a seed file, choosing the format from the extension
    /// (`.toml`, anything else is JSON).
    ///
    /// ## Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| StorageError::Connection(format!("{}: {e}", path.display())))?;
        if is_toml(path) {
            Self::from_toml(&text)
        } else {
            Self::from_json(&text)
        }
    }

    /// Writes the seed back to a file in the format its extension names.
    ///
    /// ## Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            toml::to_string_pretty(self).map_err(|e| StorageError::Serialization(e.to_string()))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| StorageError::Serialization(e.to_string()))?
        };
        std::fs::write(path, text)
            .map_err(|e| StorageError::Connection(format!("{}: {e}", path.display())))
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<UserId, AdminUserRecord>,
    passwords: HashMap<UserId, String>,
    rights: BTreeMap<RightId, Right>,
    roles: BTreeMap<RoleKey, Role>,
    levels: BTreeMap<LevelId, Level>,
    workgroups: BTreeMap<WorkgroupKey, Workgroup>,
    user_rights: HashMap<UserId, BTreeSet<RightId>>,
    user_roles: HashMap<UserId, BTreeSet<RoleKey>>,
    user_workgroups: HashMap<UserId, BTreeSet<WorkgroupKey>>,
}

impl Inner {
    fn require_user(&self, user_id: UserId) -> StorageResult<()> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(StorageError::not_found("AdminUser", user_id))
        }
    }

    fn load_user(&self, user_id: UserId) -> Option<AdminUser> {
        let record = self.users.get(&user_id)?;
        let mut user = AdminUser::new(record.user_id, record.access_code.clone());
        record.apply_to(&mut user);
        user.rights = self.user_rights.get(&user_id).cloned().unwrap_or_default();
        user.roles = self.user_roles.get(&user_id).cloned().unwrap_or_default();
        user.workgroups = self.user_workgroups.get(&user_id).cloned().unwrap_or_default();
        Some(user)
    }
}

/// Thread-safe in-memory implementation of every provider trait.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    inner: RwLock<Inner>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the seed's contents.
    #[must_use]
    pub fn from_seed(seed: DirectorySeed) -> Self {
        let directory = Self::new();
        for right in seed.rights {
            directory.insert_right(right);
        }
        for role in seed.roles {
            directory.insert_role(role);
        }
        for workgroup in seed.workgroups {
            directory.insert_workgroup(workgroup);
        }
        for level in seed.levels {
            directory.insert_level(level);
        }
        for user in seed.users {
            directory.insert_user(user);
        }
        directory
    }

    /// Exports the directory's contents.
    #[must_use]
    pub fn snapshot(&self) -> DirectorySeed {
        let inner = self.inner.read();
        DirectorySeed {
            users: inner
                .users
                .keys()
                .filter_map(|id| inner.load_user(*id))
                .collect(),
            rights: inner.rights.values().cloned().collect(),
            roles: inner.roles.values().cloned().collect(),
            workgroups: inner.workgroups.values().cloned().collect(),
            levels: inner.levels.values().cloned().collect(),
        }
    }

    /// Inserts or replaces a user together with its inline assignments.
    pub fn insert_user(&self, user: AdminUser) {
        let mut inner = self.inner.write();
        let id = user.user_id;
        inner.users.insert(id, AdminUserRecord::from(&user));
        inner.user_rights.insert(id, user.rights);
        inner.user_roles.insert(id, user.roles);
        inner.user_workgroups.insert(id, user.workgroups);
    }

    /// Inserts or replaces a right.
    pub fn insert_right(&self, right: Right) {
        self.inner.write().rights.insert(right.id.clone(), right);
    }

    /// Inserts or replaces a role.
    pub fn insert_role(&self, role: Role) {
        self.inner.write().roles.insert(role.key.clone(), role);
    }

    /// Inserts or replaces a workgroup.
    pub fn insert_workgroup(&self, workgroup: Workgroup) {
        self.inner
            .write()
            .workgroups
            .insert(workgroup.key.clone(), workgroup);
    }

    /// Inserts or replaces a level.
    pub fn insert_level(&self, level: Level) {
        self.inner.write().levels.insert(level.id, level);
    }

    /// Sets a user's stored password.
    pub fn set_password(&self, user_id: UserId, password: impl Into<String>) {
        self.inner.write().passwords.insert(user_id, password.into());
    }

    /// Gets a user's stored password.
    #[must_use]
    pub fn password(&self, user_id: UserId) -> Option<String> {
        self.inner.read().passwords.get(&user_id).cloned()
    }

    /// Returns the number of users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.inner.read().users.len()
    }
}

#[async_trait]
impl UserProvider for InMemoryDirectory {
    async fn get_user(&self, user_id: UserId) -> StorageResult<Option<AdminUser>> {
        Ok(self.inner.read().load_user(user_id))
    }

    async fn update(
        &self,
        record: &AdminUserRecord,
        mode: PasswordUpdateMode,
    ) -> StorageResult<()> {
        let mut inner = self.inner.write();
        inner.require_user(record.user_id)?;
        let mut stored = record.clone();
        let password = stored.password.take();
        inner.users.insert(record.user_id, stored);
        if let (PasswordUpdateMode::Update, Some(password)) = (mode, password) {
            inner.passwords.insert(record.user_id, password);
        }
        tracing::debug!(user_id = record.user_id, ?mode, "user record updated");
        Ok(())
    }

    async fn get_rights(&self, user_id: UserId) -> StorageResult<BTreeSet<RightId>> {
        let inner = self.inner.read();
        Ok(inner.user_rights.get(&user_id).cloned().unwrap_or_default())
    }

    async fn get_roles(&self, user_id: UserId) -> StorageResult<BTreeSet<RoleKey>> {
        let inner = self.inner.read();
        Ok(inner.user_roles.get(&user_id).cloned().unwrap_or_default())
    }

    async fn grant_right(&self, user_id: UserId, right_id: &str) -> StorageResult<()> {
        let mut inner = self.inner.write();
        inner.require_user(user_id)?;
        if !inner.rights.contains_key(right_id) {
            return Err(StorageError::not_found("Right", right_id));
        }
        inner
            .user_rights
            .entry(user_id)
            .or_default()
            .insert(right_id.to_string());
        Ok(())
    }

    async fn grant_role(&self, user_id: UserId, role_key: &str) -> StorageResult<()> {
        let mut inner = self.inner.write();
        inner.require_user(user_id)?;
        if !inner.roles.contains_key(role_key) {
            return Err(StorageError::not_found("Role", role_key));
        }
        inner
            .user_roles
            .entry(user_id)
            .or_default()
            .insert(role_key.to_string());
        Ok(())
    }
}

#[async_trait]
impl RightProvider for InMemoryDirectory {
    async fn get_right(&self, right_id: &str) -> StorageResult<Option<Right>> {
        Ok(self.inner.read().rights.get(right_id).cloned())
    }
}

#[async_trait]
impl RoleProvider for InMemoryDirectory {
    async fn get_role(&self, role_key: &str) -> StorageResult<Option<Role>> {
        Ok(self.inner.read().roles.get(role_key).cloned())
    }
}

#[async_trait]
impl LevelProvider for InMemoryDirectory {
    async fn get_level(&self, level: LevelId) -> StorageResult<Option<Level>> {
        Ok(self.inner.read().levels.get(&level).cloned())
    }
}

#[async_trait]
impl WorkgroupProvider for InMemoryDirectory {
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.inner.read().workgroups.contains_key(key))
    }

    async fn add_user(&self, user_id: UserId, key: &str) -> StorageResult<()> {
        let mut inner = self.inner.write();
        inner.require_user(user_id)?;
        if !inner.workgroups.contains_key(key) {
            return Err(StorageError::not_found("Workgroup", key));
        }
        inner
            .user_workgroups
            .entry(user_id)
            .or_default()
            .insert(key.to_string());
        Ok(())
    }

    async fn get_user_workgroups(&self, user_id: UserId) -> StorageResult<BTreeSet<WorkgroupKey>> {
        let inner = self.inner.read();
        Ok(inner.user_workgroups.get(&user_id).cloned().unwrap_or_default())
    }
}
