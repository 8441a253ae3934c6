//! annotext
//!
//! Command-line front end: manage documents, run automatic annotation,
//! label spans by hand, and maintain the knowledge base that manual labels
//! feed into.

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod commands;
mod config;

use cli::Cli;
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = AppConfig::load(&cli.config, &cli)?;
    info!("Store: {:?}", config.store_path);

    let service = commands::build_service(&config)?;
    commands::run(&service, cli.command)
}

/// Initialize tracing/logging. Logs go to stderr so command output stays
/// machine-readable.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("annotext=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("annotext=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
