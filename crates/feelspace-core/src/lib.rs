//! Feel Space Core Library
//!
//! Shared functionality for the Feel Space wellness tracker:
//! - Emotion log store and game reward ledger (SQLite, optional SQLCipher)
//! - Analytics engine: distributions, time/day patterns, weekly trends,
//!   streaks, and rule-based insights
//! - CSV import/export of emotion logs

pub mod analytics;
pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod models;

/// Test helpers shared by unit tests
#[cfg(test)]
pub(crate) mod test_utils;

pub use analytics::{
    parse_days, AnalyticsEngine, AnalyticsReport, InsightItem, InsightKind, InsightRule,
    DEFAULT_WINDOW_DAYS,
};
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use import::parse_emotion_csv;
pub use models::{EmotionClass, EmotionLog, GameSession, NewEmotionLog, NewGameSession};
