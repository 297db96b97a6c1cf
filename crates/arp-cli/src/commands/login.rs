//! The `login` command.
//!
//! Simulates the host binding an authenticated user into a new session with
//! the provisioning listener registered.

use std::sync::Arc;

use arp_core::Event;
use arp_provisioning::InMemoryEventSink;
use arp_session::{AdminUserSessionListener, HttpSession, SessionHooks, ADMIN_USER_ATTRIBUTE};
use serde::Serialize;
use tabled::Tabled;

use super::UserDisplay;
use crate::cli::LoginArgs;
use crate::config::{load_config, load_directory, save_directory, OutputFormat};
use crate::output::{info, output, render_table, success};

/// Audit event for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct EventDisplay {
    /// Event type.
    pub event: String,
    /// Outcome.
    pub outcome: String,
    /// Event details.
    pub details: String,
}

impl From<&Event> for EventDisplay {
    fn from(event: &Event) -> Self {
        let mut details: Vec<String> = event
            .details
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        if let Some(error) = &event.error {
            details.push(format!("error={error}"));
        }
        Self {
            event: format!("{:?}", event.event_type),
            outcome: format!("{:?}", event.outcome),
            details: details.join(" "),
        }
    }
}

/// Full result of a simulated login, for JSON output.
#[derive(Debug, Serialize)]
struct LoginReport {
    user: UserDisplay,
    events: Vec<EventDisplay>,
}

/// Runs the `login` command.
///
/// ## Errors
///
/// Returns an error if a file cannot be loaded or saved, or the user does
/// not exist.
pub async fn run_login(args: LoginArgs, format: OutputFormat) -> crate::CliResult<()> {
    let target = args.target;
    let config = load_config(&target.properties)?;
    let store = load_directory(&target.directory)?;
    let user = super::fetch_user(&store, target.user).await?;

    let sink = Arc::new(InMemoryEventSink::new());
    let service = Arc::new(super::service(config, store.clone()).with_event_sink(sink.clone()));

    let hooks = Arc::new(SessionHooks::new());
    hooks.register(Arc::new(AdminUserSessionListener::new(service)));
    let session = HttpSession::new(hooks);

    session.set_attribute(ADMIN_USER_ATTRIBUTE, user).await?;

    let bound = session
        .admin_user(ADMIN_USER_ATTRIBUTE)
        .ok_or_else(|| crate::CliError::NotFound {
            resource_type: "session attribute".to_string(),
            id: ADMIN_USER_ATTRIBUTE.to_string(),
        })?;
    let events: Vec<EventDisplay> = sink.events().iter().map(EventDisplay::from).collect();

    match format {
        OutputFormat::Json => {
            let report = LoginReport {
                user: UserDisplay::from(&bound),
                events,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            output(&[UserDisplay::from(&bound)], format)?;
            if events.is_empty() {
                info("No provisioning events recorded.");
            } else {
                println!("{}", render_table(&events));
            }
        }
    }

    if args.save {
        save_directory(&store, &target.directory)?;
        if format == OutputFormat::Table {
            success(&format!("Directory saved to {}", target.directory.display()));
        }
    }

    Ok(())
}
