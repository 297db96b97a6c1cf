//! Login flow tests.

use std::collections::BTreeSet;

use arp_core::{EventType, ProvisioningConfig};
use arp_session::ADMIN_USER_ATTRIBUTE;
use arp_storage::{UserProvider, WorkgroupProvider};

use crate::common::{standard_config, TestEnv};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Tests that a new user is provisioned and rebound on login.
#[tokio::test]
async fn test_new_user_receives_defaults() -> anyhow::Result<()> {
    let env = TestEnv::new(standard_config());
    let session = env.session();
    let newbie = env.store.get_user(1).await?.expect("fixture user");

    session.set_attribute(ADMIN_USER_ATTRIBUTE, newbie).await?;

    let bound = session
        .admin_user(ADMIN_USER_ATTRIBUTE)
        .expect("user stays bound");
    assert_eq!(bound.rights, set(&["R1"]));
    assert_eq!(bound.workgroups, set(&["WG1"]));
    assert_eq!(bound.level, 3);

    let stored = env.store.get_user(1).await?.expect("fixture user");
    assert_eq!(stored, bound);
    assert_eq!(env.store.get_user_workgroups(1).await?, set(&["WG1"]));

    let events = env.events.events();
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.session_id == Some(session.id())));

    Ok(())
}

/// Tests that users who already hold something are never touched.
#[tokio::test]
async fn test_existing_user_is_left_alone() -> anyhow::Result<()> {
    let env = TestEnv::new(standard_config());
    let session = env.session();
    let veteran = env.store.get_user(2).await?.expect("fixture user");

    session
        .set_attribute(ADMIN_USER_ATTRIBUTE, veteran.clone())
        .await?;

    assert_eq!(session.admin_user(ADMIN_USER_ATTRIBUTE), Some(veteran));
    assert_eq!(env.store.get_rights(2).await?, set(&["R2"]));

    let types: Vec<_> = env.events.events().iter().map(|e| e.event_type).collect();
    assert_eq!(types, vec![EventType::ProvisioningSkipped]);

    Ok(())
}

/// Tests that administrators are exempt unless the flag says otherwise.
#[tokio::test]
async fn test_administrator_exemption() -> anyhow::Result<()> {
    let exempt = TestEnv::new(standard_config());
    let root = exempt.store.get_user(3).await?.expect("fixture user");
    exempt
        .session()
        .set_attribute(ADMIN_USER_ATTRIBUTE, root)
        .await?;
    assert!(exempt.store.get_rights(3).await?.is_empty());

    let included = TestEnv::new(standard_config().with_active_for_admin(true));
    let root = included.store.get_user(3).await?.expect("fixture user");
    included
        .session()
        .set_attribute(ADMIN_USER_ATTRIBUTE, root)
        .await?;
    assert_eq!(included.store.get_rights(3).await?, set(&["R1"]));

    Ok(())
}

/// Tests that inactive accounts are never provisioned.
#[tokio::test]
async fn test_inactive_user_is_skipped() -> anyhow::Result<()> {
    let env = TestEnv::new(standard_config());
    let ghost = env.store.get_user(4).await?.expect("fixture user");

    env.session()
        .set_attribute(ADMIN_USER_ATTRIBUTE, ghost)
        .await?;

    let stored = env.store.get_user(4).await?.expect("fixture user");
    assert!(stored.rights.is_empty());
    assert_eq!(stored.level, 1);

    Ok(())
}

/// Tests that a second login of the same user changes nothing.
#[tokio::test]
async fn test_relogin_is_a_no_op() -> anyhow::Result<()> {
    let env = TestEnv::new(standard_config().with_roles(["editor"]));

    let first = env.session();
    let newbie = env.store.get_user(1).await?.expect("fixture user");
    first.set_attribute(ADMIN_USER_ATTRIBUTE, newbie).await?;
    let after_first = env.store.get_user(1).await?.expect("fixture user");

    let second = env.session();
    second
        .set_attribute(ADMIN_USER_ATTRIBUTE, after_first.clone())
        .await?;
    let after_second = env.store.get_user(1).await?.expect("fixture user");

    assert_eq!(after_first, after_second);
    assert_eq!(after_second.roles, set(&["editor"]));

    Ok(())
}

/// Tests that concurrent first logins converge on the same result.
#[tokio::test]
async fn test_concurrent_first_logins() -> anyhow::Result<()> {
    let env = TestEnv::new(standard_config());
    let newbie = env.store.get_user(1).await?.expect("fixture user");
    let (a, b) = (env.session(), env.session());

    let (ra, rb) = tokio::join!(
        a.set_attribute(ADMIN_USER_ATTRIBUTE, newbie.clone()),
        b.set_attribute(ADMIN_USER_ATTRIBUTE, newbie),
    );
    ra?;
    rb?;

    let stored = env.store.get_user(1).await?.expect("fixture user");
    assert_eq!(stored.rights, set(&["R1"]));
    assert_eq!(stored.workgroups, set(&["WG1"]));
    assert_eq!(stored.level, 3);

    Ok(())
}

/// Tests that configured ids missing from the stores are ignored.
#[tokio::test]
async fn test_unknown_defaults_are_ignored() -> anyhow::Result<()> {
    let config = ProvisioningConfig::default()
        .with_rights(["R404", "R3"])
        .with_workgroups(["WG404"])
        .with_level(Some(99));
    let env = TestEnv::new(config);
    let newbie = env.store.get_user(1).await?.expect("fixture user");

    env.session()
        .set_attribute(ADMIN_USER_ATTRIBUTE, newbie)
        .await?;

    let stored = env.store.get_user(1).await?.expect("fixture user");
    assert_eq!(stored.rights, set(&["R3"]));
    assert!(stored.workgroups.is_empty());
    assert_eq!(stored.level, 1);

    Ok(())
}

/// Tests that replacing the bound user does not provision again.
#[tokio::test]
async fn test_replacement_does_not_provision() -> anyhow::Result<()> {
    let env = TestEnv::new(standard_config());
    let session = env.session();

    session.set_attribute(ADMIN_USER_ATTRIBUTE, "placeholder").await?;
    let newbie = env.store.get_user(1).await?.expect("fixture user");
    session.set_attribute(ADMIN_USER_ATTRIBUTE, newbie).await?;

    assert!(env.store.get_rights(1).await?.is_empty());
    assert!(env.events.events().is_empty());

    Ok(())
}
