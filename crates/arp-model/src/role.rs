//! Role domain model.
//!
//! Roles are used for role-based access control (RBAC).

use serde::{Deserialize, Serialize};

/// Key of a role.
pub type RoleKey = String;

/// A named bundle of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique key.
    pub key: RoleKey,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Role {
    /// Creates a role with the given key.
    #[must_use]
    pub fn new(key: impl Into<RoleKey>) -> Self {
        Self {
            key: key.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
