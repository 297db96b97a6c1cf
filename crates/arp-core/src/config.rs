//! Configuration loading.
//!
//! Provisioning defaults are read once at startup from a property source
//! and frozen into a [`ProvisioningConfig`]. Property sources can be a
//! `.properties` file, the process environment, or a layered combination
//! where earlier sources win.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Comma-separated right ids granted to new users.
pub const PROPERTY_DEFAULT_RIGHTS: &str = "adminrightprovider.default.rights.list";
/// Comma-separated role keys granted to new users.
pub const PROPERTY_DEFAULT_ROLES: &str = "adminrightprovider.default.roles.list";
/// Comma-separated workgroup keys new users join.
pub const PROPERTY_DEFAULT_WORKGROUPS: &str = "adminrightprovider.default.workgroups.list";
/// Level assigned to new users.
pub const PROPERTY_DEFAULT_LEVEL: &str = "adminrightprovider.default.level";
/// Whether administrators also receive the defaults.
pub const PROPERTY_ACTIVE_FOR_ADMIN: &str = "adminrightprovider.activeForAdmin";

/// Level value meaning "no default level".
pub const UNSET_LEVEL: i32 = -1;

/// A source of string-valued properties.
pub trait PropertySource: Send + Sync {
    /// Gets a raw property value.
    fn get(&self, key: &str) -> Option<String>;

    /// Gets a string property, or `default` when absent.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Gets an integer property.
    ///
    /// Unparseable values fall back to `default`.
    fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.get(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, default, "ignoring non-integer property");
                default
            }),
            None => default,
        }
    }

    /// Gets a boolean property (`true`/`false`, any case).
    ///
    /// Unparseable values fall back to `default`.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    tracing::warn!(key, value = %raw, default, "ignoring non-boolean property");
                    default
                }
            },
            None => default,
        }
    }
}

/// Properties held in memory.
#[derive(Debug, Clone, Default)]
pub struct MapProperties {
    values: HashMap<String, String>,
}

impl MapProperties {
    /// Creates an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets a property in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parses `.properties` text.
    ///
    /// Accepts `key=value` and `key: value` lines. Lines starting with `#`
    /// or `!` are comments. A line without a separator sets the key to an
    /// empty value.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut properties = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            match line.find(['=', ':']) {
                Some(idx) => {
                    let key = line[..idx].trim();
                    let value = line[idx + 1..].trim();
                    properties.insert(key, value);
                }
                None => properties.insert(line, ""),
            }
        }
        properties
    }

    /// Reads and parses a `.properties` file.
    ///
    /// ## Errors
    ///
    /// Returns `Error::Io` if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&text))
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for MapProperties {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Properties read from the process environment.
///
/// Property `a.b.c` is read from variable `A_B_C`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProperties;

impl EnvProperties {
    /// Loads an optional `.env` file and returns the environment source.
    #[must_use]
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self
    }

    /// Maps a property key to its environment variable name.
    #[must_use]
    pub fn variable_name(key: &str) -> String {
        key.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect()
    }
}

impl PropertySource for EnvProperties {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::variable_name(key)).ok()
    }
}

/// Ordered stack of property sources; the first source holding a key wins.
#[derive(Default)]
pub struct LayeredProperties {
    layers: Vec<Box<dyn PropertySource>>,
}

impl LayeredProperties {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a lower-priority layer.
    #[must_use]
    pub fn with_layer(mut self, source: impl PropertySource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }
}

impl PropertySource for LayeredProperties {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}

impl std::fmt::Debug for LayeredProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredProperties")
            .field("layers", &self.layers.len())
            .finish()
    }
}

/// Provisioning defaults as configured, before store filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Right ids, in configured order.
    pub rights: Vec<String>,
    /// Role keys, in configured order.
    pub roles: Vec<String>,
    /// Workgroup keys, in configured order.
    pub workgroups: Vec<String>,
    /// Level to assign, `None` when unset.
    pub level: Option<i32>,
    /// Whether administrators also receive the defaults.
    pub active_for_admin: bool,
}

impl ProvisioningConfig {
    /// Loads the configuration from a property source.
    #[must_use]
    pub fn load(source: &dyn PropertySource) -> Self {
        let level = source.get_int(PROPERTY_DEFAULT_LEVEL, UNSET_LEVEL);
        let config = Self {
            rights: split_list(&source.get_or(PROPERTY_DEFAULT_RIGHTS, "")),
            roles: split_list(&source.get_or(PROPERTY_DEFAULT_ROLES, "")),
            workgroups: split_list(&source.get_or(PROPERTY_DEFAULT_WORKGROUPS, "")),
            level: (level >= 0).then_some(level),
            active_for_admin: source.get_bool(PROPERTY_ACTIVE_FOR_ADMIN, false),
        };
        tracing::info!(
            rights = config.rights.len(),
            roles = config.roles.len(),
            workgroups = config.workgroups.len(),
            level = ?config.level,
            active_for_admin = config.active_for_admin,
            "provisioning defaults loaded"
        );
        config
    }

    /// Loads the configuration from a `.properties` file layered under the
    /// environment.
    ///
    /// ## Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = MapProperties::from_path(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        let layered = LayeredProperties::new()
            .with_layer(EnvProperties::load())
            .with_layer(file);
        Ok(Self::load(&layered))
    }

    /// Sets the default rights.
    #[must_use]
    pub fn with_rights<I, S>(mut self, rights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rights = rights.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default roles.
    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default workgroups.
    #[must_use]
    pub fn with_workgroups<I, S>(mut self, workgroups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.workgroups = workgroups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default level.
    #[must_use]
    pub const fn with_level(mut self, level: Option<i32>) -> Self {
        self.level = level;
        self
    }

    /// Sets whether administrators also receive the defaults.
    #[must_use]
    pub const fn with_active_for_admin(mut self, active: bool) -> Self {
        self.active_for_admin = active;
        self
    }

    /// Returns whether nothing at all is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rights.is_empty()
            && self.roles.is_empty()
            && self.workgroups.is_empty()
            && self.level.is_none()
    }
}

/// Splits a comma-separated list, dropping blanks and repeated entries.
fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_empty_config() {
        let config = ProvisioningConfig::load(&MapProperties::new());

        assert!(config.is_empty());
        assert_eq!(config.level, None);
        assert!(!config.active_for_admin);
    }

    #[test]
    fn lists_are_trimmed_and_deduplicated() {
        let props = MapProperties::new()
            .with(PROPERTY_DEFAULT_RIGHTS, " R1, R2 ,,R1,")
            .with(PROPERTY_DEFAULT_WORKGROUPS, "WG1");
        let config = ProvisioningConfig::load(&props);

        assert_eq!(config.rights, vec!["R1", "R2"]);
        assert_eq!(config.workgroups, vec!["WG1"]);
        assert!(config.roles.is_empty());
    }

    #[test]
    fn negative_or_garbage_level_is_unset() {
        let minus_one = MapProperties::new().with(PROPERTY_DEFAULT_LEVEL, "-1");
        assert_eq!(ProvisioningConfig::load(&minus_one).level, None);

        let garbage = MapProperties::new().with(PROPERTY_DEFAULT_LEVEL, "three");
        assert_eq!(ProvisioningConfig::load(&garbage).level, None);

        let three = MapProperties::new().with(PROPERTY_DEFAULT_LEVEL, " 3 ");
        assert_eq!(ProvisioningConfig::load(&three).level, Some(3));
    }

    #[test]
    fn level_zero_is_a_real_level() {
        let props = MapProperties::new().with(PROPERTY_DEFAULT_LEVEL, "0");
        let config = ProvisioningConfig::load(&props);

        assert_eq!(config.level, Some(0));
        assert!(!config.is_empty());
    }

    #[test]
    fn active_for_admin_is_case_insensitive() {
        let props = MapProperties::new().with(PROPERTY_ACTIVE_FOR_ADMIN, "TRUE");
        assert!(ProvisioningConfig::load(&props).active_for_admin);

        let props = MapProperties::new().with(PROPERTY_ACTIVE_FOR_ADMIN, "yes");
        assert!(!ProvisioningConfig::load(&props).active_for_admin);
    }

    #[test]
    fn properties_text_is_parsed() {
        let text = "\
# defaults
adminrightprovider.default.roles.list = editor,reviewer
! legacy comment
adminrightprovider.default.level: 2
adminrightprovider.activeForAdmin=true
";
        let config = ProvisioningConfig::load(&MapProperties::parse(text));

        assert_eq!(config.roles, vec!["editor", "reviewer"]);
        assert_eq!(config.level, Some(2));
        assert!(config.active_for_admin);
    }

    #[test]
    fn first_layer_wins() {
        let layered = LayeredProperties::new()
            .with_layer(MapProperties::new().with(PROPERTY_DEFAULT_LEVEL, "5"))
            .with_layer(
                MapProperties::new()
                    .with(PROPERTY_DEFAULT_LEVEL, "1")
                    .with(PROPERTY_DEFAULT_ROLES, "editor"),
            );
        let config = ProvisioningConfig::load(&layered);

        assert_eq!(config.level, Some(5));
        assert_eq!(config.roles, vec!["editor"]);
    }

    #[test]
    fn env_variable_names() {
        assert_eq!(
            EnvProperties::variable_name(PROPERTY_DEFAULT_RIGHTS),
            "ADMINRIGHTPROVIDER_DEFAULT_RIGHTS_LIST"
        );
        assert_eq!(
            EnvProperties::variable_name(PROPERTY_ACTIVE_FOR_ADMIN),
            "ADMINRIGHTPROVIDER_ACTIVEFORADMIN"
        );
    }
}
