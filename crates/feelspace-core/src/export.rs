//! CSV export of emotion logs
//!
//! Output uses the same columns as [`crate::import::parse_emotion_csv`]
//! accepts, so an export can be re-imported into another database.

use serde::Serialize;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::EmotionLog;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    wallet_address: &'a str,
    emotion: &'a str,
    intensity: u8,
    notes: &'a str,
    timestamp: String,
}

impl<'a> From<&'a EmotionLog> for CsvRow<'a> {
    fn from(log: &'a EmotionLog) -> Self {
        Self {
            wallet_address: &log.wallet_address,
            emotion: &log.emotion,
            intensity: log.intensity,
            notes: &log.notes,
            timestamp: log.timestamp.to_rfc3339(),
        }
    }
}

/// Write logs as CSV, header included
pub fn write_emotion_csv(logs: &[EmotionLog]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    if logs.is_empty() {
        wtr.write_record(["wallet_address", "emotion", "intensity", "notes", "timestamp"])?;
    }
    for log in logs {
        wtr.serialize(CsvRow::from(log))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))
}

impl Database {
    /// Export every log for a wallet, oldest first
    pub fn export_emotion_logs_csv(&self, wallet: &str) -> Result<String> {
        let logs = self.all_emotion_logs(wallet)?;
        tracing::info!(wallet, rows = logs.len(), "Exporting emotion logs");
        write_emotion_csv(&logs)
    }
}
