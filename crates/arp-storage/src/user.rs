//! Admin user storage provider trait.

use std::collections::BTreeSet;

use arp_model::{AdminUser, RightId, RoleKey, UserId, UserStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageResult;

/// How an update treats the stored password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordUpdateMode {
    /// Leave the stored credentials untouched.
    #[default]
    Ignore,
    /// Replace the stored password with the record's password.
    Update,
}

/// The flat user record written back to the user store.
///
/// Assignments are not part of the record; they are written through the
/// dedicated grant operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUserRecord {
    /// Unique identifier.
    pub user_id: UserId,
    /// Login name.
    pub access_code: String,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Email address.
    pub email: String,
    /// Preferred locale.
    pub locale: Option<String>,
    /// Account status.
    pub status: UserStatus,
    /// Privilege level.
    pub level: i32,
    /// Administrator flag.
    pub admin: bool,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
    /// Password expiry date.
    pub password_max_valid_date: Option<DateTime<Utc>>,
    /// Account expiry date.
    pub account_max_valid_date: Option<DateTime<Utc>>,
    /// New password; only honoured with [`PasswordUpdateMode::Update`].
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

impl From<&AdminUser> for AdminUserRecord {
    fn from(user: &AdminUser) -> Self {
        Self {
            user_id: user.user_id,
            access_code: user.access_code.clone(),
            last_name: user.last_name.clone(),
            first_name: user.first_name.clone(),
            email: user.email.clone(),
            locale: user.locale.clone(),
            status: user.status,
            level: user.level,
            admin: user.admin,
            last_login: user.last_login,
            password_max_valid_date: user.password_max_valid_date,
            account_max_valid_date: user.account_max_valid_date,
            password: None,
        }
    }
}

impl AdminUserRecord {
    /// Copies the record's scalar fields onto a user, keeping its assignments.
    pub fn apply_to(&self, user: &mut AdminUser) {
        user.access_code.clone_from(&self.access_code);
        user.last_name.clone_from(&self.last_name);
        user.first_name.clone_from(&self.first_name);
        user.email.clone_from(&self.email);
        user.locale.clone_from(&self.locale);
        user.status = self.status;
        user.level = self.level;
        user.admin = self.admin;
        user.last_login = self.last_login;
        user.password_max_valid_date = self.password_max_valid_date;
        user.account_max_valid_date = self.account_max_valid_date;
    }
}

/// Provider for admin user storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Gets a user by id, with its rights, roles and workgroups loaded.
    async fn get_user(&self, user_id: UserId) -> StorageResult<Option<AdminUser>>;

    /// Updates an existing user record.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn update(&self, record: &AdminUserRecord, mode: PasswordUpdateMode)
        -> StorageResult<()>;

    /// Gets the rights granted to a user.
    async fn get_rights(&self, user_id: UserId) -> StorageResult<BTreeSet<RightId>>;

    /// Gets the roles assigned to a user.
    async fn get_roles(&self, user_id: UserId) -> StorageResult<BTreeSet<RoleKey>>;

    /// Grants a right to a user. Granting a held right is a no-op.
    async fn grant_right(&self, user_id: UserId, right_id: &str) -> StorageResult<()>;

    /// Assigns a role to a user. Assigning a held role is a no-op.
    async fn grant_role(&self, user_id: UserId, role_key: &str) -> StorageResult<()>;
}
