//! # arp-storage
//!
//! Storage abstraction traits for the admin right provider.
//!
//! The provisioning service only talks to the back office through these
//! provider interfaces; concrete stores implement them.
//!
//! ## Provider Traits
//!
//! - [`UserProvider`] - admin user lookup, update and right/role grants
//! - [`RightProvider`] - right lookup
//! - [`RoleProvider`] - role lookup
//! - [`LevelProvider`] - level lookup
//! - [`WorkgroupProvider`] - workgroup existence and membership
//! - [`UserRecordWriter`] - level updates through the concrete user record
//!
//! [`memory::InMemoryDirectory`] implements all of them in memory.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod level;
pub mod memory;
pub mod right;
pub mod role;
pub mod user;
pub mod workgroup;
pub mod writer;

pub use error::{StorageError, StorageResult};
pub use level::LevelProvider;
pub use memory::{DirectorySeed, InMemoryDirectory};
pub use right::RightProvider;
pub use role::RoleProvider;
pub use user::{AdminUserRecord, PasswordUpdateMode, UserProvider};
pub use workgroup::WorkgroupProvider;
pub use writer::{ProviderLevelWriter, UserRecordWriter};
