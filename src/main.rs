// src/main.rs
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use taskflow::cli::{App, Args};
use taskflow::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    // RUST_LOG wins, then --verbose, then the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if args.verbose { "debug" } else { config.global.log_level.as_str() };
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting taskflow v{}", env!("CARGO_PKG_VERSION"));

    let app = App::new(config, args.config.as_deref());
    match app.run_command(&args.command).await {
        Ok(true) => Ok(()),
        Ok(false) => exit(1),
        Err(e) => {
            error!("Command execution failed: {}", e);
            exit(1);
        }
    }
}
