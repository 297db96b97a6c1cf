//! Effective defaults and the provisioning decision.
//!
//! Configured ids that have no record in their store are not real defaults
//! and are dropped here, so neither the decision nor the apply step ever
//! sees them.

use arp_core::ProvisioningConfig;
use arp_model::{AdminUser, LevelId, Right, Role, WorkgroupKey};
use arp_storage::StorageResult;

use crate::directory::Directory;

/// Defaults that exist in the stores, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveDefaults {
    /// Rights to grant.
    pub rights: Vec<Right>,
    /// Roles to assign.
    pub roles: Vec<Role>,
    /// Workgroups to join.
    pub workgroups: Vec<WorkgroupKey>,
    /// Level to set, when configured and known.
    pub level: Option<LevelId>,
}

impl EffectiveDefaults {
    /// Filters the configured defaults against the stores.
    ///
    /// ## Errors
    ///
    /// Returns the first store error encountered.
    pub async fn resolve(config: &ProvisioningConfig, directory: &Directory) -> StorageResult<Self> {
        let mut defaults = Self::default();

        for right_id in &config.rights {
            match directory.rights.get_right(right_id).await? {
                Some(right) => defaults.rights.push(right),
                None => tracing::debug!(right_id = %right_id, "ignoring unknown default right"),
            }
        }

        for role_key in &config.roles {
            match directory.roles.get_role(role_key).await? {
                Some(role) => defaults.roles.push(role),
                None => tracing::debug!(role_key = %role_key, "ignoring unknown default role"),
            }
        }

        for key in &config.workgroups {
            if directory.workgroups.exists(key).await? {
                defaults.workgroups.push(key.clone());
            } else {
                tracing::debug!(workgroup = %key, "ignoring unknown default workgroup");
            }
        }

        if let Some(level) = config.level {
            if directory.levels.get_level(level).await?.is_some() {
                defaults.level = Some(level);
            } else {
                tracing::debug!(level, "ignoring unknown default level");
            }
        }

        Ok(defaults)
    }

    /// Returns whether there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rights.is_empty()
            && self.roles.is_empty()
            && self.workgroups.is_empty()
            && self.level.is_none()
    }
}

/// Decides whether a bound user should receive the defaults.
///
/// Never provisions when there is nothing to apply, when the user is an
/// administrator and administrators are exempt, or when the account is not
/// active. Otherwise provisions only users holding no role, right or
/// workgroup yet.
#[must_use]
pub fn should_provision(
    defaults: &EffectiveDefaults,
    active_for_admin: bool,
    user: &AdminUser,
) -> bool {
    if defaults.is_empty() {
        return false;
    }

    if user.admin && !active_for_admin {
        return false;
    }

    if !user.is_active() {
        return false;
    }

    user.has_no_assignments()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arp_model::{Level, UserStatus, Workgroup};
    use arp_storage::InMemoryDirectory;

    use super::*;

    fn some_defaults() -> EffectiveDefaults {
        EffectiveDefaults {
            rights: vec![Right::new("R1")],
            ..EffectiveDefaults::default()
        }
    }

    #[test]
    fn empty_defaults_never_provision() {
        let defaults = EffectiveDefaults::default();
        let users = [
            AdminUser::new(1, "new"),
            AdminUser::new(2, "admin").with_admin(true),
            AdminUser::new(3, "old").with_right("R2"),
        ];

        for user in &users {
            assert!(!should_provision(&defaults, true, user));
            assert!(!should_provision(&defaults, false, user));
        }
    }

    #[test]
    fn inactive_users_never_provision() {
        for status in [UserStatus::Inactive, UserStatus::Expired, UserStatus::Anonymized] {
            let user = AdminUser::new(1, "u").with_status(status);
            assert!(!should_provision(&some_defaults(), true, &user));
        }
    }

    #[test]
    fn admins_are_exempt_unless_active_for_admin() {
        let admin = AdminUser::new(1, "root").with_admin(true);

        assert!(!should_provision(&some_defaults(), false, &admin));
        assert!(should_provision(&some_defaults(), true, &admin));
    }

    #[test]
    fn new_user_with_defaults_provisions() {
        let user = AdminUser::new(1, "new");
        assert!(should_provision(&some_defaults(), false, &user));

        let level_only = EffectiveDefaults {
            level: Some(3),
            ..EffectiveDefaults::default()
        };
        assert!(should_provision(&level_only, false, &user));
    }

    #[test]
    fn existing_assignments_block_provisioning() {
        for user in [
            AdminUser::new(1, "u").with_right("R2"),
            AdminUser::new(1, "u").with_role("editor"),
            AdminUser::new(1, "u").with_workgroup("WG9"),
        ] {
            assert!(!should_provision(&some_defaults(), true, &user));
        }
    }

    #[tokio::test]
    async fn unknown_ids_are_dropped() {
        let store = Arc::new(InMemoryDirectory::new());
        store.insert_right(Right::new("R1"));
        store.insert_workgroup(Workgroup::new("WG1"));
        store.insert_level(Level::new(3, "manager"));
        let directory = Directory::in_memory(store);

        let config = ProvisioningConfig::default()
            .with_rights(["R1", "R404"])
            .with_roles(["ghost"])
            .with_workgroups(["WG1", "WG404"])
            .with_level(Some(3));
        let defaults = EffectiveDefaults::resolve(&config, &directory).await.unwrap();

        assert_eq!(defaults.rights, vec![Right::new("R1")]);
        assert!(defaults.roles.is_empty());
        assert_eq!(defaults.workgroups, vec!["WG1".to_string()]);
        assert_eq!(defaults.level, Some(3));
    }

    #[tokio::test]
    async fn unknown_level_is_unset() {
        let directory = Directory::in_memory(Arc::new(InMemoryDirectory::new()));
        let config = ProvisioningConfig::default().with_level(Some(8));

        let defaults = EffectiveDefaults::resolve(&config, &directory).await.unwrap();
        assert_eq!(defaults.level, None);
        assert!(defaults.is_empty());
    }
}
