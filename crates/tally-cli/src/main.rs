//! Tally CLI - Expense tracking bot operations
//!
//! Usage:
//!   tally init                       Initialize database
//!   tally sweep                      Run the retention purge once
//!   tally categories --chat-id ID    List a user's active categories
//!   tally stats --chat-id ID         Print chart-ready statistics as JSON

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let db = cli.db.as_deref();
    match cli.command {
        Commands::Init => commands::cmd_init(db, cli.no_encrypt),
        Commands::Sweep { retention_days } => {
            commands::cmd_sweep(db, cli.no_encrypt, retention_days)
        }
        Commands::Categories { chat_id } => {
            commands::cmd_categories(db, cli.no_encrypt, chat_id)
        }
        Commands::Stats {
            chat_id,
            period,
            top,
        } => commands::cmd_stats(db, cli.no_encrypt, chat_id, &period, top),
    }
}
