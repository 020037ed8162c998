//! Emotion log store

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

use super::{format_datetime, parse_datetime, require_wallet, Database};
use crate::error::{Error, Result};
use crate::import::ImportStats;
use crate::models::{normalize_emotion, EmotionLog, NewEmotionLog, MAX_INTENSITY, MIN_INTENSITY};

const EMOTION_LOG_COLUMNS: &str = "id, wallet_address, emotion, intensity, notes, timestamp";

/// Validated, normalized insert values for an emotion log
struct EmotionRow {
    wallet: String,
    emotion: String,
    intensity: i64,
    notes: String,
    timestamp: DateTime<Utc>,
}

fn validate(log: &NewEmotionLog) -> Result<EmotionRow> {
    let wallet = require_wallet(&log.wallet_address)?.to_string();

    let emotion = normalize_emotion(&log.emotion);
    if emotion.is_empty() {
        return Err(Error::InvalidData("emotion must not be empty".to_string()));
    }

    if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&log.intensity) {
        return Err(Error::InvalidData(format!(
            "intensity must be between {} and {} (got {})",
            MIN_INTENSITY, MAX_INTENSITY, log.intensity
        )));
    }

    Ok(EmotionRow {
        wallet,
        emotion,
        intensity: log.intensity,
        notes: log.notes.trim().to_string(),
        timestamp: log.timestamp.unwrap_or_else(Utc::now),
    })
}

fn row_to_emotion_log(row: &rusqlite::Row) -> rusqlite::Result<EmotionLog> {
    let timestamp: String = row.get(5)?;
    Ok(EmotionLog {
        id: row.get(0)?,
        wallet_address: row.get(1)?,
        emotion: row.get(2)?,
        intensity: row.get(3)?,
        notes: row.get(4)?,
        timestamp: parse_datetime(&timestamp),
    })
}

impl Database {
    /// Record a single emotion log
    pub fn record_emotion(&self, log: &NewEmotionLog) -> Result<EmotionLog> {
        let row = validate(log)?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO emotion_logs (wallet_address, emotion, intensity, notes, timestamp, import_hash)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                row.wallet,
                row.emotion,
                row.intensity,
                row.notes,
                format_datetime(&row.timestamp),
                log.import_hash
            ],
        )?;
        let id = conn.last_insert_rowid();

        info!(id, wallet = %row.wallet, emotion = %row.emotion, "Recorded emotion");

        self.get_emotion_log(id)?
            .ok_or_else(|| Error::NotFound(format!("emotion log {}", id)))
    }

    /// Bulk insert emotion logs, skipping rows whose import hash already exists
    ///
    /// All rows are validated before anything is written.
    pub fn import_emotion_logs(&self, logs: &[NewEmotionLog]) -> Result<ImportStats> {
        let rows = logs.iter().map(validate).collect::<Result<Vec<_>>>()?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut stats = ImportStats::default();

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO emotion_logs
                    (wallet_address, emotion, intensity, notes, timestamp, import_hash)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )?;

            for (row, log) in rows.iter().zip(logs) {
                let changed = stmt.execute(params![
                    row.wallet,
                    row.emotion,
                    row.intensity,
                    row.notes,
                    format_datetime(&row.timestamp),
                    log.import_hash
                ])?;
                if changed > 0 {
                    stats.imported += 1;
                } else {
                    stats.skipped += 1;
                }
            }
        }

        tx.commit()?;
        info!(
            imported = stats.imported,
            skipped = stats.skipped,
            "Emotion log import complete"
        );
        Ok(stats)
    }

    /// Get a single emotion log by id
    pub fn get_emotion_log(&self, id: i64) -> Result<Option<EmotionLog>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM emotion_logs WHERE id = ?",
            EMOTION_LOG_COLUMNS
        );
        let log = conn
            .query_row(&sql, params![id], row_to_emotion_log)
            .optional()?;
        Ok(log)
    }

    /// List the most recent emotion logs for a wallet (newest first)
    pub fn list_emotion_logs(&self, wallet: &str, limit: i64) -> Result<Vec<EmotionLog>> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {}
            FROM emotion_logs
            WHERE wallet_address = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
            EMOTION_LOG_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![wallet.trim(), limit], row_to_emotion_log)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    /// All emotion logs for a wallet with `timestamp >= since` (newest first)
    ///
    /// This is the analytics engine's only read.
    pub fn get_emotion_logs_since(
        &self,
        wallet: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<EmotionLog>> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {}
            FROM emotion_logs
            WHERE wallet_address = ? AND timestamp >= ?
            ORDER BY timestamp DESC, id DESC
            "#,
            EMOTION_LOG_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(
                params![wallet.trim(), format_datetime(&since)],
                row_to_emotion_log,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(wallet = wallet.trim(), count = logs.len(), "Loaded emotion window");
        Ok(logs)
    }

    /// All emotion logs for a wallet, oldest first (for export)
    pub fn all_emotion_logs(&self, wallet: &str) -> Result<Vec<EmotionLog>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM emotion_logs WHERE wallet_address = ? ORDER BY timestamp ASC, id ASC",
            EMOTION_LOG_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![wallet.trim()], row_to_emotion_log)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    /// Delete an emotion log
    pub fn delete_emotion_log(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM emotion_logs WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("emotion log {}", id)));
        }
        info!(id, "Deleted emotion log");
        Ok(())
    }
}
