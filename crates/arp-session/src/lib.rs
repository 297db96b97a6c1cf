//! # arp-session
//!
//! Session attribute hooks for the admin right provider.
//!
//! A host registers listeners on a [`SessionHooks`] registry; every
//! [`HttpSession`] created against that registry reports attribute
//! additions, replacements and removals to them.
//! [`AdminUserSessionListener`] provisions an admin user the first time it
//! is bound under the tracked attribute.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod hooks;
pub mod listener;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use hooks::{AttributeEventKind, SessionAttributeListener, SessionHooks};
pub use listener::{AdminUserSessionListener, ADMIN_USER_ATTRIBUTE};
pub use session::{HttpSession, SessionValue};
