//! # arp
//!
//! Command-line entry point for the admin right provider.

#![forbid(unsafe_code)]

use arp_cli::{
    cli::{Cli, Command},
    commands::{run_check, run_defaults, run_login},
    output::error,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Execute command
    let result = match cli.command {
        Command::Defaults(args) => run_defaults(args, cli.output).await,
        Command::Check(args) => run_check(args, cli.output).await,
        Command::Login(args) => run_login(args, cli.output).await,
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
