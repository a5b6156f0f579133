//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Expense tracking bot operations
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Operator tooling for the Tally expense-tracking bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TALLY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Run the retention purge once: hard-delete categories soft-deleted
    /// past the retention window, expenses first
    Sweep {
        /// Override the retention window in days
        #[arg(long)]
        retention_days: Option<i64>,
    },

    /// List a user's active categories
    Categories {
        /// External chat identity of the user
        #[arg(long)]
        chat_id: i64,
    },

    /// Print chart-ready statistics as JSON
    Stats {
        /// External chat identity of the user
        #[arg(long)]
        chat_id: i64,

        /// Period: week or month
        #[arg(long, default_value = "week")]
        period: String,

        /// Top-N pie dataset instead of the per-category bar pages
        #[arg(long)]
        top: bool,
    },
}
