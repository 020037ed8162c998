//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Feel Space - Track how you feel, discover your patterns
#[derive(Parser)]
#[command(name = "feelspace")]
#[command(about = "Emotion journal with analytics and mini-game rewards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "feelspace.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set FEELSPACE_DB_KEY environment variable with your passphrase.
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

    /// Log an emotion
    Log {
        /// Wallet address the log belongs to
        #[arg(short, long)]
        wallet: String,

        /// Emotion (happy, excited, grateful, calm, anxious, sad, angry, tired, ...)
        #[arg(short, long)]
        emotion: String,

        /// Intensity from 1 to 10
        #[arg(short, long)]
        intensity: i64,

        /// Free-text notes
        #[arg(short, long)]
        notes: Option<String>,

        /// When it was felt (RFC 3339, or "YYYY-MM-DD HH:MM:SS" local time; default now)
        #[arg(long)]
        at: Option<String>,
    },

    /// List recent emotion logs
    Logs {
        #[arg(short, long)]
        wallet: String,

        /// Maximum number of logs to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Show the analytics report for a wallet
    Analytics {
        #[arg(short, long)]
        wallet: String,

        /// Trailing window in days (invalid values use 30)
        #[arg(short, long, default_value = "30", allow_negative_numbers = true)]
        days: i64,

        /// Print the raw JSON report
        #[arg(long)]
        json: bool,
    },

    /// Mini-game sessions and rewards
    Games {
        #[command(subcommand)]
        action: GamesAction,
    },

    /// Show activity and reward totals for a wallet
    Summary {
        #[arg(short, long)]
        wallet: String,
    },

    /// Import emotion logs from CSV
    ///
    /// Columns: wallet_address,emotion,intensity,notes,timestamp.
    /// Re-importing the same rows is a no-op.
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export a wallet's emotion logs to CSV
    Export {
        #[arg(short, long)]
        wallet: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Subcommand)]
pub enum GamesAction {
    /// Record a played game session
    Add {
        #[arg(short, long)]
        wallet: String,

        /// Game name (e.g. "Bubble Pop")
        #[arg(short, long)]
        game: String,

        #[arg(short, long, default_value = "0")]
        score: i64,

        /// Duration in seconds
        #[arg(short, long, default_value = "0")]
        duration: i64,

        /// Token reward earned
        #[arg(short, long, default_value = "0")]
        reward: f64,
    },

    /// List recent game sessions
    List {
        #[arg(short, long)]
        wallet: String,

        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Attach the on-chain transaction hash to a session's reward
    Confirm {
        /// Game session ID
        id: i64,

        /// Transaction hash
        tx_hash: String,
    },
}
