//! Provisioning audit sinks.

use arp_core::Event;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Errors that can occur while recording an event.
#[derive(Debug, thiserror::Error)]
pub enum EventSinkError {
    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Destination for provisioning audit events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Records an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be recorded.
    async fn record(&self, event: Event) -> Result<(), EventSinkError>;
}

/// Sink that writes events to the tracing framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    /// Creates a new tracing sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for TracingEventSink {
    async fn record(&self, event: Event) -> Result<(), EventSinkError> {
        tracing::info!(
            event_id = %event.id,
            event_type = ?event.event_type,
            outcome = ?event.outcome,
            user_id = ?event.user_id,
            session_id = ?event.session_id,
            error = ?event.error,
            details = ?event.details,
            "provisioning_event"
        );
        Ok(())
    }
}

/// In-memory sink, mostly for tests.
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventSink {
    /// Creates a new in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.read().clone()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

#[async_trait]
impl EventSink for InMemoryEventSink {
    async fn record(&self, event: Event) -> Result<(), EventSinkError> {
        self.events.write().push(event);
        Ok(())
    }
}
