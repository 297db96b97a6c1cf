//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// Admin right provider - inspect and simulate default provisioning.
#[derive(Debug, Parser)]
#[command(name = "arp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the configured defaults and, with a directory, the effective ones.
    Defaults(DefaultsArgs),

    /// Show whether a stored user would receive the defaults.
    Check(UserArgs),

    /// Bind a stored user into a fresh session and show the result.
    Login(LoginArgs),
}

/// Arguments of the `defaults` command.
#[derive(Debug, Args)]
pub struct DefaultsArgs {
    /// Provisioning `.properties` file.
    #[arg(short, long, env = "ARP_PROPERTIES")]
    pub properties: PathBuf,

    /// Directory file (`.json` or `.toml`).
    #[arg(short, long, env = "ARP_DIRECTORY")]
    pub directory: Option<PathBuf>,
}

/// Arguments naming a stored user.
#[derive(Debug, Args)]
pub struct UserArgs {
    /// Provisioning `.properties` file.
    #[arg(short, long, env = "ARP_PROPERTIES")]
    pub properties: PathBuf,

    /// Directory file (`.json` or `.toml`).
    #[arg(short, long, env = "ARP_DIRECTORY")]
    pub directory: PathBuf,

    /// User ID.
    #[arg(short, long)]
    pub user: i32,
}

/// Arguments of the `login` command.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// The user to log in.
    #[command(flatten)]
    pub target: UserArgs,

    /// Write the updated directory back to its file.
    #[arg(long)]
    pub save: bool,
}
