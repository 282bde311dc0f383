//! Courier API Client - Main Entry Point
//!
//! Parses the command line, initializes logging and runs one command
//! against the local state directory.

mod cli;
mod commands;
mod config;
mod output;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::resolve(cli.data_dir.clone(), cli.verbose)?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        "starting Courier v{}",
        env!("CARGO_PKG_VERSION")
    );

    commands::run(cli.command, &config).await
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
