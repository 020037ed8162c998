//! Game session and wallet commands

use anyhow::Result;
use chrono::Local;
use feelspace_core::db::Database;
use feelspace_core::models::NewGameSession;

pub fn cmd_games_add(
    db: &Database,
    wallet: &str,
    game: &str,
    score: i64,
    duration_secs: i64,
    reward_amount: f64,
) -> Result<()> {
    let session = db.record_game_session(&NewGameSession {
        wallet_address: wallet.to_string(),
        game: game.to_string(),
        score,
        duration_secs,
        reward_amount,
        played_at: None,
    })?;
    db.log_audit(
        &session.wallet_address,
        "create",
        Some("game_session"),
        Some(session.id),
        Some("source=cli"),
    )?;

    println!(
        "🎮 Recorded {} session #{} (score {}, reward {})",
        session.game, session.id, session.score, session.reward_amount
    );
    Ok(())
}

pub fn cmd_games_list(db: &Database, wallet: &str, limit: i64) -> Result<()> {
    let sessions = db.list_game_sessions(wallet, limit)?;

    if sessions.is_empty() {
        println!("No game sessions for {}.", wallet);
        return Ok(());
    }

    println!();
    println!(
        "{:<6} {:<17} {:<14} {:>7} {:>9}  Reward tx",
        "ID", "Played", "Game", "Score", "Reward"
    );
    println!("{}", "─".repeat(72));
    for s in &sessions {
        println!(
            "{:<6} {:<17} {:<14} {:>7} {:>9.2}  {}",
            s.id,
            s.played_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            super::truncate(&s.game, 14),
            s.score,
            s.reward_amount,
            s.tx_hash.as_deref().unwrap_or("pending")
        );
    }
    println!();
    Ok(())
}

pub fn cmd_games_confirm(db: &Database, id: i64, tx_hash: &str) -> Result<()> {
    let session = db.confirm_reward(id, tx_hash)?;
    db.log_audit(
        &session.wallet_address,
        "confirm_reward",
        Some("game_session"),
        Some(id),
        Some(&format!("tx_hash={}", tx_hash.trim())),
    )?;

    println!("✅ Reward for session #{} confirmed ({})", id, tx_hash.trim());
    Ok(())
}

pub fn cmd_summary(db: &Database, wallet: &str) -> Result<()> {
    let summary = db.get_wallet_summary(wallet)?;

    println!();
    println!("👛 {}", summary.wallet_address);
    println!("   Emotion logs:      {}", summary.total_logs);
    if let (Some(first), Some(last)) = (summary.first_log_at, summary.last_log_at) {
        println!(
            "   Logging since:     {} (last {})",
            first.with_timezone(&Local).format("%Y-%m-%d"),
            last.with_timezone(&Local).format("%Y-%m-%d")
        );
    }
    println!("   Games played:      {}", summary.total_games);
    println!(
        "   Rewards:           {:.2} ({:.2} confirmed on-chain)",
        summary.total_rewards, summary.confirmed_rewards
    );
    println!();
    Ok(())
}
