//! Command implementations.

pub mod check;
pub mod defaults;
pub mod login;

pub use check::run_check;
pub use defaults::run_defaults;
pub use login::run_login;

use std::sync::Arc;

use arp_core::ProvisioningConfig;
use arp_model::{AdminUser, UserId};
use arp_provisioning::{DefaultRightsService, Directory};
use arp_storage::{InMemoryDirectory, UserProvider};
use serde::Serialize;
use tabled::Tabled;

use crate::output::join;

/// Admin user representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct UserDisplay {
    /// User ID.
    pub id: UserId,
    /// Access code.
    pub access_code: String,
    /// Full name.
    pub name: String,
    /// Account status.
    pub status: String,
    /// Privilege level.
    pub level: i32,
    /// Whether the user is an administrator.
    pub admin: bool,
    /// Granted rights.
    pub rights: String,
    /// Assigned roles.
    pub roles: String,
    /// Workgroup memberships.
    pub workgroups: String,
}

impl From<&AdminUser> for UserDisplay {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.user_id,
            access_code: user.access_code.clone(),
            name: user.full_name().unwrap_or_else(|| "-".to_string()),
            status: user.status.to_string(),
            level: user.level,
            admin: user.admin,
            rights: join(&user.rights),
            roles: join(&user.roles),
            workgroups: join(&user.workgroups),
        }
    }
}

/// Builds a provisioning service over an in-memory store.
fn service(config: ProvisioningConfig, store: Arc<InMemoryDirectory>) -> DefaultRightsService {
    DefaultRightsService::new(config, Directory::in_memory(store))
}

/// Fetches a stored user, failing when it does not exist.
async fn fetch_user(store: &InMemoryDirectory, user_id: UserId) -> crate::CliResult<AdminUser> {
    store
        .get_user(user_id)
        .await?
        .ok_or_else(|| crate::CliError::NotFound {
            resource_type: "user".to_string(),
            id: user_id.to_string(),
        })
}
