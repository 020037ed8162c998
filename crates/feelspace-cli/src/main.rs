//! Feel Space CLI - Emotion journal with analytics
//!
//! Usage:
//!   feelspace init                                   Initialize database
//!   feelspace log -w 0xabc -e happy -i 7             Log an emotion
//!   feelspace analytics -w 0xabc --days 30           Show analytics report
//!   feelspace import --file logs.csv                 Import emotion logs
//!   feelspace serve --port 3000                      Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
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

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Log {
            wallet,
            emotion,
            intensity,
            notes,
            at,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_log(
                &db,
                &wallet,
                &emotion,
                intensity,
                notes.as_deref(),
                at.as_deref(),
            )
        }
        Commands::Logs { wallet, limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_logs(&db, &wallet, limit)
        }
        Commands::Analytics { wallet, days, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_analytics(&db, &wallet, days, json)
        }
        Commands::Games { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                GamesAction::Add {
                    wallet,
                    game,
                    score,
                    duration,
                    reward,
                } => commands::cmd_games_add(&db, &wallet, &game, score, duration, reward),
                GamesAction::List { wallet, limit } => {
                    commands::cmd_games_list(&db, &wallet, limit)
                }
                GamesAction::Confirm { id, tx_hash } => {
                    commands::cmd_games_confirm(&db, id, &tx_hash)
                }
            }
        }
        Commands::Summary { wallet } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_summary(&db, &wallet)
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_import(&db, &file).map(|_| ())
        }
        Commands::Export { wallet, output } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_export(&db, &wallet, output.as_deref())
        }
        Commands::Serve { port, host } => {
            commands::cmd_serve(&cli.db, &host, port, cli.no_encrypt).await
        }
    }
}
