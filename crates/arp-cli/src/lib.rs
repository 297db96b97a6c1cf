//! # arp-cli
//!
//! Operator tool for the admin right provider.
//!
//! This crate provides command-line utilities for:
//! - Inspecting the configured and effective provisioning defaults
//! - Checking whether a stored user would be provisioned
//! - Simulating a back-office login against a directory file

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use error::{CliError, CliResult};
