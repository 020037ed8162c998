//! Emotion logging commands

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use feelspace_core::db::Database;
use feelspace_core::models::NewEmotionLog;

use super::truncate;

/// Parse a `--at` value: RFC 3339, or a naive local "YYYY-MM-DD HH:MM:SS"
pub fn parse_when(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("Invalid time '{}' (use RFC 3339 or YYYY-MM-DD HH:MM:SS)", s))?;
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("'{}' does not exist in the local timezone", s))?;
    Ok(local.with_timezone(&Utc))
}

pub fn cmd_log(
    db: &Database,
    wallet: &str,
    emotion: &str,
    intensity: i64,
    notes: Option<&str>,
    at: Option<&str>,
) -> Result<()> {
    let mut log = NewEmotionLog::new(wallet, emotion, intensity);
    if let Some(notes) = notes {
        log = log.with_notes(notes);
    }
    if let Some(at) = at {
        log = log.at(parse_when(at)?);
    }

    let saved = db.record_emotion(&log)?;
    db.log_audit(
        &saved.wallet_address,
        "create",
        Some("emotion_log"),
        Some(saved.id),
        Some("source=cli"),
    )?;

    println!(
        "✅ Logged {} ({}/10) at {}",
        saved.emotion,
        saved.intensity,
        saved.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

pub fn cmd_logs(db: &Database, wallet: &str, limit: i64) -> Result<()> {
    let logs = db.list_emotion_logs(wallet, limit)?;

    if logs.is_empty() {
        println!("No emotion logs for {}.", wallet);
        return Ok(());
    }

    println!();
    println!("{:<6} {:<17} {:<10} {:>9}  Notes", "ID", "When", "Emotion", "Intensity");
    println!("{}", "─".repeat(72));
    for log in &logs {
        println!(
            "{:<6} {:<17} {:<10} {:>9}  {}",
            log.id,
            log.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            log.emotion,
            log.intensity,
            truncate(&log.notes, 30)
        );
    }
    println!();
    println!("{} log(s)", logs.len());
    Ok(())
}
