//! Mini-game sessions and mirrored token rewards

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{format_datetime, parse_datetime, require_wallet, Database};
use crate::error::{Error, Result};
use crate::models::{GameSession, NewGameSession, WalletSummary};

const GAME_SESSION_COLUMNS: &str =
    "id, wallet_address, game, score, duration_secs, reward_amount, tx_hash, played_at";

fn row_to_game_session(row: &rusqlite::Row) -> rusqlite::Result<GameSession> {
    let played_at: String = row.get(7)?;
    Ok(GameSession {
        id: row.get(0)?,
        wallet_address: row.get(1)?,
        game: row.get(2)?,
        score: row.get(3)?,
        duration_secs: row.get(4)?,
        reward_amount: row.get(5)?,
        tx_hash: row.get(6)?,
        played_at: parse_datetime(&played_at),
    })
}

impl Database {
    /// Record a played game and the reward it earned
    pub fn record_game_session(&self, session: &NewGameSession) -> Result<GameSession> {
        let wallet = require_wallet(&session.wallet_address)?;
        let game = session.game.trim();
        if game.is_empty() {
            return Err(Error::InvalidData("game must not be empty".to_string()));
        }
        if session.score < 0 || session.duration_secs < 0 {
            return Err(Error::InvalidData(
                "score and duration must not be negative".to_string(),
            ));
        }
        if !session.reward_amount.is_finite() || session.reward_amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "invalid reward amount: {}",
                session.reward_amount
            )));
        }

        let played_at = session.played_at.unwrap_or_else(Utc::now);
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO game_sessions (wallet_address, game, score, duration_secs, reward_amount, played_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                wallet,
                game,
                session.score,
                session.duration_secs,
                session.reward_amount,
                format_datetime(&played_at)
            ],
        )?;
        let id = conn.last_insert_rowid();

        info!(id, wallet, game, reward = session.reward_amount, "Recorded game session");

        self.get_game_session(id)?
            .ok_or_else(|| Error::NotFound(format!("game session {}", id)))
    }

    pub fn get_game_session(&self, id: i64) -> Result<Option<GameSession>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM game_sessions WHERE id = ?",
            GAME_SESSION_COLUMNS
        );
        let session = conn
            .query_row(&sql, params![id], row_to_game_session)
            .optional()?;
        Ok(session)
    }

    /// List recent game sessions for a wallet (newest first)
    pub fn list_game_sessions(&self, wallet: &str, limit: i64) -> Result<Vec<GameSession>> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {}
            FROM game_sessions
            WHERE wallet_address = ?
            ORDER BY played_at DESC, id DESC
            LIMIT ?
            "#,
            GAME_SESSION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let sessions = stmt
            .query_map(params![wallet.trim(), limit], row_to_game_session)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    /// Attach the on-chain transaction hash for a session's reward
    ///
    /// Confirming again with the same hash is a no-op; a different hash is rejected.
    /// The write only lands on an unconfirmed row, so concurrent confirmations
    /// with different hashes cannot both succeed.
    pub fn confirm_reward(&self, id: i64, tx_hash: &str) -> Result<GameSession> {
        let tx_hash = tx_hash.trim();
        if tx_hash.is_empty() {
            return Err(Error::InvalidData("tx hash must not be empty".to_string()));
        }

        let updated = self.conn()?.execute(
            "UPDATE game_sessions SET tx_hash = ?1 WHERE id = ?2 AND tx_hash IS NULL",
            params![tx_hash, id],
        )?;

        let session = self
            .get_game_session(id)?
            .ok_or_else(|| Error::NotFound(format!("game session {}", id)))?;

        match session.tx_hash.as_deref() {
            Some(existing) if existing == tx_hash => {
                if updated > 0 {
                    info!(id, tx_hash, "Confirmed reward");
                }
                Ok(session)
            }
            existing => Err(Error::InvalidData(format!(
                "reward for session {} already confirmed with {}",
                id,
                existing.unwrap_or("another hash")
            ))),
        }
    }

    /// Activity totals for a wallet
    pub fn get_wallet_summary(&self, wallet: &str) -> Result<WalletSummary> {
        let wallet = require_wallet(wallet)?;
        let conn = self.conn()?;

        let (total_logs, first_log_at, last_log_at): (i64, Option<String>, Option<String>) = conn
            .query_row(
                "SELECT COUNT(*), MIN(timestamp), MAX(timestamp) FROM emotion_logs WHERE wallet_address = ?",
                params![wallet],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

        let (total_games, total_rewards, confirmed_rewards): (i64, f64, f64) = conn.query_row(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(reward_amount), 0),
                COALESCE(SUM(CASE WHEN tx_hash IS NOT NULL THEN reward_amount ELSE 0 END), 0)
            FROM game_sessions
            WHERE wallet_address = ?
            "#,
            params![wallet],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(WalletSummary {
            wallet_address: wallet.to_string(),
            total_logs,
            total_games,
            total_rewards,
            confirmed_rewards,
            first_log_at: first_log_at.as_deref().map(parse_datetime),
            last_log_at: last_log_at.as_deref().map(parse_datetime),
        })
    }
}
