//! CSV import of emotion logs
//!
//! Format (header required):
//! `wallet_address,emotion,intensity,notes,timestamp`
//!
//! `timestamp` is RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC). `notes` may be
//! empty or the column omitted.

use std::io::Read;

use chrono::{DateTime, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{normalize_emotion, NewEmotionLog};

/// Outcome of an import batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub imported: usize,
    /// Rows whose hash was already present
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    wallet_address: String,
    emotion: String,
    intensity: i64,
    #[serde(default)]
    notes: String,
    timestamp: String,
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Hash of the fields that identify a log, for dedup on re-import
fn generate_hash(
    wallet: &str,
    emotion: &str,
    intensity: i64,
    timestamp: &DateTime<Utc>,
    notes: &str,
) -> String {
    let mut hasher = Sha256::new();
    // Length prefixes keep adjacent text fields from running together
    for text in [wallet, emotion] {
        hasher.update((text.len() as u64).to_be_bytes());
        hasher.update(text.as_bytes());
    }
    hasher.update(intensity.to_be_bytes());
    hasher.update(timestamp.timestamp().to_be_bytes());
    hasher.update(notes.as_bytes());
    hex::encode(hasher.finalize())
}

/// Parse an emotion log CSV into insertable records
///
/// Every record carries an `import_hash`. Range checks on intensity happen
/// at insert time, not here.
pub fn parse_emotion_csv<R: Read>(reader: R) -> Result<Vec<NewEmotionLog>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut logs = Vec::new();

    for (idx, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // Line 1 is the header
        let line = idx + 2;
        let row = result.map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;

        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| {
            Error::Import(format!(
                "line {}: unable to parse timestamp: {}",
                line, row.timestamp
            ))
        })?;
        let wallet = row.wallet_address.trim().to_string();
        let emotion = normalize_emotion(&row.emotion);

        let import_hash = generate_hash(&wallet, &emotion, row.intensity, &timestamp, &row.notes);

        let mut log = NewEmotionLog::new(wallet, emotion, row.intensity)
            .with_notes(row.notes)
            .at(timestamp);
        log.import_hash = Some(import_hash);
        logs.push(log);
    }

    debug!("Parsed {} emotion log rows", logs.len());
    Ok(logs)
}
