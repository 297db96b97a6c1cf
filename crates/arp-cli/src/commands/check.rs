//! The `check` command.

use arp_provisioning::AdminUserSessionService;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::UserArgs;
use crate::config::{load_config, load_directory, OutputFormat};
use crate::output::output;

/// Provisioning decision for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DecisionDisplay {
    /// User ID.
    pub id: i32,
    /// Access code.
    pub access_code: String,
    /// Account status.
    pub status: String,
    /// Whether the user is an administrator.
    pub admin: bool,
    /// Whether the defaults would be applied at login.
    pub provision: bool,
}

/// Runs the `check` command.
///
/// ## Errors
///
/// Returns an error if a file cannot be loaded, the user does not exist, or
/// a store lookup fails.
pub async fn run_check(args: UserArgs, format: OutputFormat) -> crate::CliResult<()> {
    let config = load_config(&args.properties)?;
    let store = load_directory(&args.directory)?;
    let user = super::fetch_user(&store, args.user).await?;

    let provision = super::service(config, store)
        .should_update_user(&user)
        .await?;

    let decision = DecisionDisplay {
        id: user.user_id,
        access_code: user.access_code,
        status: user.status.to_string(),
        admin: user.admin,
        provision,
    };
    output(&[decision], format)
}
