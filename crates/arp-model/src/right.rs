//! Right domain model.
//!
//! A right grants access to one back-office feature.

use serde::{Deserialize, Serialize};

/// Identifier of a right (e.g. `CORE_USERS_MANAGEMENT`).
pub type RightId = String;

/// A named permission grantable to an admin user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Right {
    /// Unique identifier.
    pub id: RightId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Minimum user level required to hold this right.
    #[serde(default)]
    pub level: i32,
    /// Entry point of the feature.
    #[serde(default)]
    pub url: Option<String>,
}

impl Right {
    /// Creates a right with the given id.
    #[must_use]
    pub fn new(id: impl Into<RightId>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: None,
            level: 0,
            url: None,
        }
    }
}
