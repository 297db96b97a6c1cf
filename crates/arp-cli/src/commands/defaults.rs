//! The `defaults` command.

use arp_core::ProvisioningConfig;
use arp_provisioning::EffectiveDefaults;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::DefaultsArgs;
use crate::config::{load_config, load_directory, OutputFormat};
use crate::output::{info, output, warning};

/// One configured default for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DefaultDisplay {
    /// What kind of default this is.
    pub kind: String,
    /// Configured identifier.
    pub id: String,
    /// Whether the stores know it: `effective`, `unknown` or `unchecked`.
    pub state: String,
}

/// Runs the `defaults` command.
///
/// ## Errors
///
/// Returns an error if a file cannot be loaded.
pub async fn run_defaults(args: DefaultsArgs, format: OutputFormat) -> crate::CliResult<()> {
    let config = load_config(&args.properties)?;

    let effective = match &args.directory {
        Some(path) => {
            let store = load_directory(path)?;
            Some(super::service(config.clone(), store).effective_defaults().await?)
        }
        None => None,
    };

    if config.is_empty() {
        warning("No provisioning defaults are configured.");
    }
    if config.active_for_admin {
        info("Administrators also receive the defaults.");
    }

    output(&rows(&config, effective.as_ref()), format)
}

/// Lists every configured default, marked against the effective set.
fn rows(config: &ProvisioningConfig, effective: Option<&EffectiveDefaults>) -> Vec<DefaultDisplay> {
    let state = |known: Option<bool>| match known {
        Some(true) => "effective",
        Some(false) => "unknown",
        None => "unchecked",
    };

    let mut rows = Vec::new();
    for id in &config.rights {
        let known = effective.map(|e| e.rights.iter().any(|r| &r.id == id));
        rows.push(row("right", id, state(known)));
    }
    for key in &config.roles {
        let known = effective.map(|e| e.roles.iter().any(|r| &r.key == key));
        rows.push(row("role", key, state(known)));
    }
    for key in &config.workgroups {
        let known = effective.map(|e| e.workgroups.contains(key));
        rows.push(row("workgroup", key, state(known)));
    }
    if let Some(level) = config.level {
        let known = effective.map(|e| e.level == Some(level));
        rows.push(row("level", &level.to_string(), state(known)));
    }
    rows
}

fn row(kind: &str, id: &str, state: &str) -> DefaultDisplay {
    DefaultDisplay {
        kind: kind.to_string(),
        id: id.to_string(),
        state: state.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use arp_model::Right;

    use super::*;

    #[test]
    fn rows_mark_unknown_entries() {
        let config = ProvisioningConfig::default()
            .with_rights(["R1", "R404"])
            .with_level(Some(3));
        let effective = EffectiveDefaults {
            rights: vec![Right::new("R1")],
            ..EffectiveDefaults::default()
        };

        let rows = rows(&config, Some(&effective));

        let states: Vec<_> = rows
            .iter()
            .map(|r| (r.id.as_str(), r.state.as_str()))
            .collect();
        assert_eq!(
            states,
            vec![("R1", "effective"), ("R404", "unknown"), ("3", "unknown")]
        );
    }

    #[test]
    fn rows_without_directory_are_unchecked() {
        let config = ProvisioningConfig::default().with_workgroups(["WG1"]);

        let rows = rows(&config, None);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, "workgroup");
        assert_eq!(rows[0].state, "unchecked");
    }
}
