//! Store failure tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use arp_core::{EventOutcome, EventType};
use arp_model::UserId;
use arp_session::ADMIN_USER_ATTRIBUTE;
use arp_storage::{InMemoryDirectory, StorageError, StorageResult, UserProvider, WorkgroupProvider};
use async_trait::async_trait;

use crate::common::{fixture_store, standard_config, TestEnv};

/// Workgroup store whose membership writes always fail.
struct BrokenWorkgroups {
    inner: Arc<InMemoryDirectory>,
}

#[async_trait]
impl WorkgroupProvider for BrokenWorkgroups {
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    async fn add_user(&self, _user_id: UserId, _key: &str) -> StorageResult<()> {
        Err(StorageError::Connection("workgroup store unreachable".to_string()))
    }

    async fn get_user_workgroups(&self, user_id: UserId) -> StorageResult<BTreeSet<String>> {
        self.inner.get_user_workgroups(user_id).await
    }
}

/// Tests that a failing store stops provisioning without undoing earlier writes.
#[tokio::test]
async fn test_failure_keeps_partial_writes() -> anyhow::Result<()> {
    let store = fixture_store();
    let broken = Arc::new(BrokenWorkgroups {
        inner: store.clone(),
    });
    let env = TestEnv::with_directory(standard_config(), store, move |mut directory| {
        directory.workgroups = broken;
        directory
    });
    let session = env.session();
    let newbie = env.store.get_user(1).await?.expect("fixture user");

    // The listener failure is logged, not returned.
    session
        .set_attribute(ADMIN_USER_ATTRIBUTE, newbie.clone())
        .await?;

    assert_eq!(session.admin_user(ADMIN_USER_ATTRIBUTE), Some(newbie));

    let stored = env.store.get_user(1).await?.expect("fixture user");
    assert_eq!(stored.level, 3);
    assert!(stored.rights.contains("R1"));
    assert!(stored.workgroups.is_empty());

    let last = env.events.events().pop().expect("summary event");
    assert_eq!(last.event_type, EventType::DefaultsApplied);
    assert_eq!(last.outcome, EventOutcome::Failure);
    assert!(last.error.is_some());

    Ok(())
}

/// Tests that a user removed from the store after authentication is reported.
#[tokio::test]
async fn test_vanished_user_is_not_rebound() -> anyhow::Result<()> {
    let env = TestEnv::new(standard_config());
    let stranger = arp_model::AdminUser::new(42, "stranger");

    env.session()
        .set_attribute(ADMIN_USER_ATTRIBUTE, stranger)
        .await?;

    let last = env.events.events().pop().expect("summary event");
    assert_eq!(last.outcome, EventOutcome::Failure);
    assert_eq!(env.store.user_count(), 4);

    Ok(())
}
