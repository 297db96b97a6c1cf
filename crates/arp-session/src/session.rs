//! Web session with observable attributes.

use std::collections::HashMap;
use std::sync::Arc;

use arp_model::AdminUser;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{SessionError, SessionResult};
use crate::hooks::{AttributeEventKind, SessionHooks};

/// A value bound to a session attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValue {
    /// An authenticated admin user.
    AdminUser(AdminUser),
    /// Any other textual value.
    Text(String),
}

impl SessionValue {
    /// Returns the admin user, if that is what is bound.
    #[must_use]
    pub const fn as_admin_user(&self) -> Option<&AdminUser> {
        match self {
            Self::AdminUser(user) => Some(user),
            Self::Text(_) => None,
        }
    }
}

impl From<AdminUser> for SessionValue {
    fn from(user: AdminUser) -> Self {
        Self::AdminUser(user)
    }
}

impl From<String> for SessionValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for SessionValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A per-user web session.
///
/// Attribute writes are reported to the listeners registered on the
/// session's [`SessionHooks`], one event at a time.
#[derive(Debug)]
pub struct HttpSession {
    /// Unique session identifier.
    id: Uuid,

    /// Bound attributes.
    attributes: RwLock<HashMap<String, SessionValue>>,

    /// Listeners notified of attribute changes.
    hooks: Arc<SessionHooks>,

    /// Whether this session has been invalidated.
    closed: RwLock<bool>,
}

impl HttpSession {
    /// Creates a new session reporting to `hooks`.
    #[must_use]
    pub fn new(hooks: Arc<SessionHooks>) -> Self {
        Self {
            id: Uuid::now_v7(),
            attributes: RwLock::new(HashMap::new()),
            hooks,
            closed: RwLock::new(false),
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Gets a session attribute.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<SessionValue> {
        self.attributes.read().get(name).cloned()
    }

    /// Gets the admin user bound under `name`.
    #[must_use]
    pub fn admin_user(&self, name: &str) -> Option<AdminUser> {
        self.attributes
            .read()
            .get(name)
            .and_then(SessionValue::as_admin_user)
            .cloned()
    }

    /// Returns the bound attribute names.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.attributes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Binds a value, then notifies listeners.
    ///
    /// A new name fires [`AttributeEventKind::Added`]; an existing one fires
    /// [`AttributeEventKind::Replaced`]. Listener failures are logged by the
    /// hooks and do not fail the write.
    ///
    /// ## Errors
    ///
    /// Returns `SessionError::Closed` if the session was invalidated.
    pub async fn set_attribute(
        &self,
        name: impl Into<String>,
        value: impl Into<SessionValue>,
    ) -> SessionResult<()> {
        self.ensure_open()?;
        let name = name.into();
        let value = value.into();

        let previous = self.attributes.write().insert(name.clone(), value.clone());
        let kind = if previous.is_some() {
            AttributeEventKind::Replaced
        } else {
            AttributeEventKind::Added
        };

        self.hooks.dispatch(self, kind, &name, &value).await;
        Ok(())
    }

    /// Unbinds a value, then notifies listeners.
    ///
    /// ## Errors
    ///
    /// Returns `SessionError::Closed` if the session was invalidated.
    pub async fn remove_attribute(&self, name: &str) -> SessionResult<Option<SessionValue>> {
        self.ensure_open()?;
        let removed = self.attributes.write().remove(name);
        if let Some(value) = &removed {
            self.hooks
                .dispatch(self, AttributeEventKind::Removed, name, value)
                .await;
        }
        Ok(removed)
    }

    /// Returns whether the session has been invalidated.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.closed.read()
    }

    /// Invalidates the session and drops its attributes.
    pub fn invalidate(&self) {
        *self.closed.write() = true;
        self.attributes.write().clear();
    }

    fn ensure_open(&self) -> SessionResult<()> {
        if self.is_closed() {
            Err(SessionError::Closed(self.id))
        } else {
            Ok(())
        }
    }
}
