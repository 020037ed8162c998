//! Domain models for Feel Space

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted emotion intensity
pub const MIN_INTENSITY: i64 = 1;

/// Highest accepted emotion intensity
pub const MAX_INTENSITY: i64 = 10;

/// A logged emotion, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionLog {
    pub id: i64,
    pub wallet_address: String,
    pub emotion: String,
    pub intensity: u8,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

/// An emotion log to be recorded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmotionLog {
    pub wallet_address: String,
    pub emotion: String,
    pub intensity: i64,
    #[serde(default)]
    pub notes: String,
    /// Defaults to the time of recording
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Set by CSV import so re-importing the same file is a no-op
    #[serde(skip)]
    pub import_hash: Option<String>,
}

impl NewEmotionLog {
    pub fn new(wallet_address: impl Into<String>, emotion: impl Into<String>, intensity: i64) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            emotion: emotion.into(),
            intensity,
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Normalize an emotion label to its stored form (trimmed, lower case)
pub fn normalize_emotion(emotion: &str) -> String {
    emotion.trim().to_lowercase()
}

/// Coarse valence of an emotion label
///
/// The taxonomy is open: labels outside the known sets are `Unclassified`
/// and count as not-positive everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionClass {
    Positive,
    Negative,
    Neutral,
    Unclassified,
}

impl EmotionClass {
    pub const POSITIVE: [&'static str; 4] = ["happy", "excited", "grateful", "calm"];
    pub const NEGATIVE: [&'static str; 3] = ["anxious", "sad", "angry"];
    pub const NEUTRAL: [&'static str; 1] = ["tired"];

    pub fn of(emotion: &str) -> Self {
        if Self::POSITIVE.contains(&emotion) {
            Self::Positive
        } else if Self::NEGATIVE.contains(&emotion) {
            Self::Negative
        } else if Self::NEUTRAL.contains(&emotion) {
            Self::Neutral
        } else {
            Self::Unclassified
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Unclassified => "unclassified",
        }
    }
}

pub fn is_positive(emotion: &str) -> bool {
    EmotionClass::of(emotion) == EmotionClass::Positive
}

pub fn is_negative(emotion: &str) -> bool {
    EmotionClass::of(emotion) == EmotionClass::Negative
}

// ========== Game Models ==========

/// A played mini-game and the reward it earned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: i64,
    pub wallet_address: String,
    pub game: String,
    pub score: i64,
    pub duration_secs: i64,
    pub reward_amount: f64,
    /// On-chain transaction hash once the reward has been minted
    pub tx_hash: Option<String>,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameSession {
    pub wallet_address: String,
    pub game: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub duration_secs: i64,
    #[serde(default)]
    pub reward_amount: f64,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

/// Per-wallet activity totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub wallet_address: String,
    pub total_logs: i64,
    pub total_games: i64,
    pub total_rewards: f64,
    /// Rewards with an on-chain transaction hash attached
    pub confirmed_rewards: f64,
    pub first_log_at: Option<DateTime<Utc>>,
    pub last_log_at: Option<DateTime<Utc>>,
}
