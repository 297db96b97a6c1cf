//! Loading of the files the commands work on.

use std::path::Path;
use std::sync::Arc;

use arp_core::ProvisioningConfig;
use arp_storage::{DirectorySeed, InMemoryDirectory};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

/// Loads the provisioning configuration, with the environment layered over
/// the file.
///
/// ## Errors
///
/// Returns an error if the file cannot be read.
pub fn load_config(path: &Path) -> crate::CliResult<ProvisioningConfig> {
    Ok(ProvisioningConfig::from_file(path)?)
}

/// Loads a directory file into an in-memory store.
///
/// ## Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_directory(path: &Path) -> crate::CliResult<Arc<InMemoryDirectory>> {
    let seed = DirectorySeed::load(path)?;
    tracing::debug!(
        path = %path.display(),
        users = seed.users.len(),
        "directory loaded"
    );
    Ok(Arc::new(InMemoryDirectory::from_seed(seed)))
}

/// Writes the store back to a directory file.
///
/// ## Errors
///
/// Returns an error if the file cannot be written.
pub fn save_directory(store: &InMemoryDirectory, path: &Path) -> crate::CliResult<()> {
    store.snapshot().save(path)?;
    tracing::debug!(path = %path.display(), "directory saved");
    Ok(())
}
