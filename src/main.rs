//! Main entry point for the broadcast console

mod cli;
mod commands;

use broadcast_console::config::Settings;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use commands::Output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::load_from_path(&cli.config)?;
    if let Some(base_url) = cli.base_url.clone() {
        settings.server.base_url = base_url;
        settings.validate()?;
    }

    // Initialize logging; stdout is reserved for command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    if settings.logging.format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    }

    debug!(base_url = %settings.server.base_url, "Loaded configuration");

    commands::run(cli.command, &cli.config, settings, Output { json: cli.json }).await
}
