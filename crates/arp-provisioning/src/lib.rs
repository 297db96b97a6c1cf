//! # arp-provisioning
//!
//! Assigns default rights, roles, workgroups and a privilege level to an
//! admin user the first time it is bound into a session.
//!
//! - [`EffectiveDefaults`] - configured defaults filtered against the stores
//! - [`should_provision`] - the pure "is this a new user" decision
//! - [`AdminUserSessionService`] - the decision/apply contract used by the
//!   session layer, implemented by [`DefaultRightsService`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod defaults;
pub mod directory;
pub mod error;
pub mod events;
pub mod service;

pub use defaults::{should_provision, EffectiveDefaults};
pub use directory::Directory;
pub use error::{ProvisioningError, ProvisioningResult};
pub use events::{EventSink, EventSinkError, InMemoryEventSink, TracingEventSink};
pub use service::{AdminUserSessionService, DefaultRightsService};
