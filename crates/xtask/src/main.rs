//! Development tasks for the battle workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{CheckContent, Simulate};

/// Development tasks for the battle workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the battle engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a battle headlessly with automatic hero choices
    Simulate(Simulate),

    /// Load and audit a content directory
    CheckContent(CheckContent),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for BATTLE_* settings and RUST_LOG)
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::CheckContent(cmd) => cmd.execute(),
    }
}
