//! Privilege level model.

use serde::{Deserialize, Serialize};

/// Identifier of a level; also its rank.
pub type LevelId = i32;

/// A privilege level known to the back office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Rank of the level.
    pub id: LevelId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl Level {
    /// Creates a level.
    #[must_use]
    pub fn new(id: LevelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
