//! # arp-model
//!
//! Domain records for the admin right provider.
//!
//! These are the plain records exchanged between the stores, the
//! provisioning service and the session layer: administrative users and the
//! rights, roles, workgroups and levels that can be assigned to them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod level;
pub mod right;
pub mod role;
pub mod user;
pub mod workgroup;

pub use level::{Level, LevelId};
pub use right::{Right, RightId};
pub use role::{Role, RoleKey};
pub use user::{AdminUser, UserId, UserStatus};
pub use workgroup::{Workgroup, WorkgroupKey};
