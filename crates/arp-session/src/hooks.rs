//! Attribute listeners and the registry that dispatches to them.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::SessionResult;
use crate::session::{HttpSession, SessionValue};

/// Kind of attribute change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeEventKind {
    /// A name was bound for the first time.
    Added,
    /// A bound name received a new value.
    Replaced,
    /// A name was unbound.
    Removed,
}

/// Observer of session attribute changes.
///
/// `value` is the value now bound, or the value just removed.
#[async_trait]
pub trait SessionAttributeListener: Send + Sync {
    /// Called after a name is bound for the first time.
    async fn attribute_added(
        &self,
        session: &HttpSession,
        name: &str,
        value: &SessionValue,
    ) -> SessionResult<()>;

    /// Called after a bound name receives a new value.
    async fn attribute_replaced(
        &self,
        _session: &HttpSession,
        _name: &str,
        _value: &SessionValue,
    ) -> SessionResult<()> {
        Ok(())
    }

    /// Called after a name is unbound.
    async fn attribute_removed(
        &self,
        _session: &HttpSession,
        _name: &str,
        _value: &SessionValue,
    ) -> SessionResult<()> {
        Ok(())
    }
}

/// Registry of attribute listeners shared by a host's sessions.
#[derive(Default)]
pub struct SessionHooks {
    listeners: RwLock<Vec<Arc<dyn SessionAttributeListener>>>,
}

impl SessionHooks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; listeners run in registration order.
    pub fn register(&self, listener: Arc<dyn SessionAttributeListener>) {
        self.listeners.write().push(listener);
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Notifies every listener of an attribute change.
    ///
    /// A failing listener is logged and the remaining listeners still run.
    pub async fn dispatch(
        &self,
        session: &HttpSession,
        kind: AttributeEventKind,
        name: &str,
        value: &SessionValue,
    ) {
        let listeners: Vec<Arc<dyn SessionAttributeListener>> = self.listeners.read().clone();

        for listener in listeners {
            let result = match kind {
                AttributeEventKind::Added => listener.attribute_added(session, name, value).await,
                AttributeEventKind::Replaced => {
                    listener.attribute_replaced(session, name, value).await
                }
                AttributeEventKind::Removed => {
                    listener.attribute_removed(session, name, value).await
                }
            };

            if let Err(e) = result {
                tracing::error!(
                    session_id = %session.id(),
                    attribute = name,
                    ?kind,
                    error = %e,
                    "session attribute listener failed"
                );
            }
        }
    }
}

impl std::fmt::Debug for SessionHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHooks")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
