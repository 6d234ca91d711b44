//! Arena - match runner for the minimax and MCTS engines
//!
//! Plays a series of games with the AI against a seeded random opponent
//! (or against itself), then prints the aggregate statistics as JSON and
//! optionally writes them to a report file.

use anyhow::Result;
use arena::config::Config;
use clap::Parser;
use tracing::info;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let summary = arena::runner::run(&config)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
