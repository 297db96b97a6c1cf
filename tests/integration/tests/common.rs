//! Common test utilities and fixtures.

use std::sync::Arc;

use arp_core::ProvisioningConfig;
use arp_model::{AdminUser, Level, Right, Role, UserStatus, Workgroup};
use arp_provisioning::{DefaultRightsService, Directory, InMemoryEventSink};
use arp_session::{AdminUserSessionListener, HttpSession, SessionHooks};
use arp_storage::InMemoryDirectory;

/// Wired-up provisioning environment.
pub struct TestEnv {
    /// Backing store.
    pub store: Arc<InMemoryDirectory>,
    /// Recorded audit events.
    pub events: Arc<InMemoryEventSink>,
    /// Hooks shared by every session this environment opens.
    pub hooks: Arc<SessionHooks>,
}

impl TestEnv {
    /// Creates an environment over the standard fixture directory.
    pub fn new(config: ProvisioningConfig) -> Self {
        Self::with_directory(config, fixture_store(), |directory| directory)
    }

    /// Creates an environment whose store handles can be swapped out.
    pub fn with_directory(
        config: ProvisioningConfig,
        store: Arc<InMemoryDirectory>,
        customize: impl FnOnce(Directory) -> Directory,
    ) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("arp_provisioning=debug,arp_session=debug")
            .with_test_writer()
            .try_init();

        let events = Arc::new(InMemoryEventSink::new());
        let directory = customize(Directory::in_memory(store.clone()));
        let service =
            Arc::new(DefaultRightsService::new(config, directory).with_event_sink(events.clone()));

        let hooks = Arc::new(SessionHooks::new());
        hooks.register(Arc::new(AdminUserSessionListener::new(service)));

        Self {
            store,
            events,
            hooks,
        }
    }

    /// Opens a new session.
    pub fn session(&self) -> HttpSession {
        HttpSession::new(Arc::clone(&self.hooks))
    }
}

/// Standard defaults: right `R1`, workgroup `WG1`, level 3.
pub fn standard_config() -> ProvisioningConfig {
    ProvisioningConfig::default()
        .with_rights(["R1"])
        .with_workgroups(["WG1"])
        .with_level(Some(3))
}

/// Directory with a handful of rights, roles, workgroups, levels and users.
///
/// Users:
/// - 1 `newbie`: active, level 1, nothing assigned
/// - 2 `veteran`: active, level 1, holds `R2`
/// - 3 `root`: active administrator, nothing assigned
/// - 4 `ghost`: expired, nothing assigned
pub fn fixture_store() -> Arc<InMemoryDirectory> {
    let store = Arc::new(InMemoryDirectory::new());
    for id in ["R1", "R2", "R3"] {
        store.insert_right(Right::new(id));
    }
    store.insert_role(Role::new("editor"));
    store.insert_workgroup(Workgroup::new("WG1"));
    store.insert_workgroup(Workgroup::new("WG2"));
    store.insert_level(Level::new(1, "staff"));
    store.insert_level(Level::new(3, "manager"));

    store.insert_user(AdminUser::new(1, "newbie").with_level(1));
    store.insert_user(AdminUser::new(2, "veteran").with_level(1).with_right("R2"));
    store.insert_user(AdminUser::new(3, "root").with_level(0).with_admin(true));
    store.insert_user(
        AdminUser::new(4, "ghost")
            .with_level(1)
            .with_status(UserStatus::Expired),
    );
    store
}
