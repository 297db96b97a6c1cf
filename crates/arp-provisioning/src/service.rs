//! The decision/apply service.
//!
//! [`AdminUserSessionService`] is the contract the session layer consumes.
//! [`DefaultRightsService`] implements it against a [`Directory`] with an
//! immutable [`ProvisioningConfig`] loaded once at startup.

use std::sync::Arc;

use arp_core::{EventBuilder, EventType, ProvisioningConfig};
use arp_model::{AdminUser, UserId};
use arp_storage::StorageResult;
use async_trait::async_trait;
use uuid::Uuid;

use crate::defaults::{should_provision, EffectiveDefaults};
use crate::directory::Directory;
use crate::error::{ProvisioningError, ProvisioningResult};
use crate::events::{EventSink, TracingEventSink};

/// Decides on and applies default provisioning for bound admin users.
#[async_trait]
pub trait AdminUserSessionService: Send + Sync {
    /// Returns whether the bound user should receive the defaults.
    async fn should_update_user(&self, user: &AdminUser) -> ProvisioningResult<bool>;

    /// Applies the defaults to the stored user and returns it refreshed.
    ///
    /// ## Errors
    ///
    /// Returns `ProvisioningError::UserNotFound` if the user is gone, or the
    /// first failing store call. Additions made before the failure remain.
    async fn update_user(&self, user_id: UserId) -> ProvisioningResult<AdminUser>;

    /// Runs the decision and, when it says so, the apply step.
    ///
    /// The session id names the session the user is being bound into, if
    /// any. Returns the refreshed user when defaults were applied.
    async fn provision(
        &self,
        user: &AdminUser,
        _session_id: Option<Uuid>,
    ) -> ProvisioningResult<Option<AdminUser>> {
        if self.should_update_user(user).await? {
            self.update_user(user.user_id).await.map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Provisioning service backed by the configured stores.
#[derive(Clone)]
pub struct DefaultRightsService {
    config: ProvisioningConfig,
    directory: Directory,
    events: Arc<dyn EventSink>,
}

impl DefaultRightsService {
    /// Creates a service that audits to the tracing framework.
    #[must_use]
    pub fn new(config: ProvisioningConfig, directory: Directory) -> Self {
        Self {
            config,
            directory,
            events: Arc::new(TracingEventSink::new()),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ProvisioningConfig {
        &self.config
    }

    /// Resolves the configured defaults against the stores.
    ///
    /// ## Errors
    ///
    /// Returns the first store error encountered.
    pub async fn effective_defaults(&self) -> StorageResult<EffectiveDefaults> {
        EffectiveDefaults::resolve(&self.config, &self.directory).await
    }

    /// Applies already resolved defaults to the stored user.
    ///
    /// Audit events carry `session_id` when one is given.
    ///
    /// ## Errors
    ///
    /// See [`AdminUserSessionService::update_user`].
    pub async fn apply(
        &self,
        defaults: &EffectiveDefaults,
        user_id: UserId,
        session_id: Option<Uuid>,
    ) -> ProvisioningResult<AdminUser> {
        match self.apply_defaults(defaults, user_id, session_id).await {
            Ok(user) => {
                self.emit(
                    EventBuilder::new(EventType::DefaultsApplied)
                        .user(user_id)
                        .detail("level", user.level.to_string())
                        .detail("rights", user.rights.len().to_string())
                        .detail("roles", user.roles.len().to_string())
                        .detail("workgroups", user.workgroups.len().to_string()),
                    session_id,
                )
                .await;
                tracing::info!(user_id, level = user.level, "default provisioning applied");
                Ok(user)
            }
            Err(e) => {
                self.emit(
                    EventBuilder::new(EventType::DefaultsApplied)
                        .user(user_id)
                        .failure(e.to_string()),
                    session_id,
                )
                .await;
                tracing::error!(user_id, error = %e, "default provisioning stopped partway");
                Err(e)
            }
        }
    }

    async fn apply_defaults(
        &self,
        defaults: &EffectiveDefaults,
        user_id: UserId,
        session_id: Option<Uuid>,
    ) -> ProvisioningResult<AdminUser> {
        let users = &self.directory.users;
        let mut user = users
            .get_user(user_id)
            .await?
            .ok_or(ProvisioningError::UserNotFound(user_id))?;

        if let Some(level) = defaults.level {
            if level != user.level {
                let previous = user.level;
                user.level = level;
                self.directory.level_writer.update_level(&user, level).await?;
                self.emit(
                    EventBuilder::new(EventType::LevelChanged)
                        .user(user_id)
                        .detail("from", previous.to_string())
                        .detail("to", level.to_string()),
                    session_id,
                )
                .await;
            }
        }

        for role in &defaults.roles {
            if !user.roles.contains(&role.key) {
                users.grant_role(user_id, &role.key).await?;
                self.emit(
                    EventBuilder::new(EventType::RoleAssigned)
                        .user(user_id)
                        .detail("role_key", role.key.clone()),
                    session_id,
                )
                .await;
            }
        }

        for right in &defaults.rights {
            if !user.rights.contains(&right.id) {
                users.grant_right(user_id, &right.id).await?;
                self.emit(
                    EventBuilder::new(EventType::RightGranted)
                        .user(user_id)
                        .detail("right_id", right.id.clone()),
                    session_id,
                )
                .await;
            }
        }

        for key in &defaults.workgroups {
            if !user.workgroups.contains(key) {
                self.directory.workgroups.add_user(user_id, key).await?;
                self.emit(
                    EventBuilder::new(EventType::WorkgroupJoined)
                        .user(user_id)
                        .detail("workgroup", key.clone()),
                    session_id,
                )
                .await;
            }
        }

        user.rights = users.get_rights(user_id).await?;
        user.roles = users.get_roles(user_id).await?;
        user.workgroups = self.directory.workgroups.get_user_workgroups(user_id).await?;

        Ok(user)
    }

    async fn emit(&self, event: EventBuilder, session_id: Option<Uuid>) {
        let event = match session_id {
            Some(id) => event.session(id),
            None => event,
        };
        if let Err(e) = self.events.record(event.build()).await {
            tracing::warn!(error = %e, "failed to record provisioning event");
        }
    }
}

impl std::fmt::Debug for DefaultRightsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultRightsService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AdminUserSessionService for DefaultRightsService {
    async fn should_update_user(&self, user: &AdminUser) -> ProvisioningResult<bool> {
        let defaults = self.effective_defaults().await?;
        Ok(should_provision(&defaults, self.config.active_for_admin, user))
    }

    async fn update_user(&self, user_id: UserId) -> ProvisioningResult<AdminUser> {
        let defaults = self.effective_defaults().await?;
        self.apply(&defaults, user_id, None).await
    }

    /// Resolves the defaults once and uses them for both steps.
    async fn provision(
        &self,
        user: &AdminUser,
        session_id: Option<Uuid>,
    ) -> ProvisioningResult<Option<AdminUser>> {
        let defaults = self.effective_defaults().await?;
        if !should_provision(&defaults, self.config.active_for_admin, user) {
            tracing::debug!(user_id = user.user_id, "bound user left untouched");
            self.emit(
                EventBuilder::new(EventType::ProvisioningSkipped)
                    .user(user.user_id)
                    .detail("status", user.status.as_str()),
                session_id,
            )
            .await;
            return Ok(None);
        }
        self.apply(&defaults, user.user_id, session_id).await.map(Some)
    }
}
