//! # arp-core
//!
//! Configuration, error handling and audit event types shared by the admin
//! right provider crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;

pub use config::{
    EnvProperties, LayeredProperties, MapProperties, PropertySource, ProvisioningConfig,
};
pub use error::{Error, Result};
pub use event::{Event, EventBuilder, EventOutcome, EventType};
