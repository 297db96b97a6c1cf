//! Workgroup domain model.

use serde::{Deserialize, Serialize};

/// Key of a workgroup.
pub type WorkgroupKey = String;

/// A scoping group limiting which resources its members may act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workgroup {
    /// Unique key.
    pub key: WorkgroupKey,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Workgroup {
    /// Creates a workgroup with the given key.
    #[must_use]
    pub fn new(key: impl Into<WorkgroupKey>) -> Self {
        Self {
            key: key.into(),
            description: None,
        }
    }
}
