//! The admin-user provisioning listener.

use std::sync::Arc;

use arp_provisioning::AdminUserSessionService;
use async_trait::async_trait;

use crate::error::SessionResult;
use crate::hooks::SessionAttributeListener;
use crate::session::{HttpSession, SessionValue};

/// Attribute under which the host binds the authenticated admin user.
pub const ADMIN_USER_ATTRIBUTE: &str = "lutece_admin_user";

/// Provisions admin users when they are first bound into a session.
///
/// Only additions of the tracked attribute holding an admin user are acted
/// on; replacements and removals are ignored. When the service applies the
/// defaults, the attribute is rebound to the refreshed user.
pub struct AdminUserSessionListener<S: ?Sized> {
    service: Arc<S>,
    attribute: String,
}

impl<S: AdminUserSessionService + ?Sized> AdminUserSessionListener<S> {
    /// Creates a listener tracking [`ADMIN_USER_ATTRIBUTE`].
    #[must_use]
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            attribute: ADMIN_USER_ATTRIBUTE.to_string(),
        }
    }

    /// Tracks a different attribute name.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Returns the tracked attribute name.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl<S: ?Sized> std::fmt::Debug for AdminUserSessionListener<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUserSessionListener")
            .field("attribute", &self.attribute)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: AdminUserSessionService + ?Sized> SessionAttributeListener for AdminUserSessionListener<S> {
    async fn attribute_added(
        &self,
        session: &HttpSession,
        name: &str,
        value: &SessionValue,
    ) -> SessionResult<()> {
        if name != self.attribute {
            return Ok(());
        }

        let SessionValue::AdminUser(user) = value else {
            tracing::warn!(
                session_id = %session.id(),
                attribute = name,
                "tracked attribute does not hold an admin user"
            );
            return Ok(());
        };

        if let Some(updated) = self.service.provision(user, Some(session.id())).await? {
            tracing::info!(
                session_id = %session.id(),
                user_id = updated.user_id,
                "rebinding provisioned admin user"
            );
            session
                .set_attribute(name, SessionValue::AdminUser(updated))
                .await?;
        }

        Ok(())
    }
}
