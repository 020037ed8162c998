//! Report types produced by the analytics engine
//!
//! Field names serialize in camelCase; dashboards consume this shape as-is.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full analytics report for one wallet and window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_logs: usize,
    pub date_range: DateRange,
    pub emotion_distribution: Vec<EmotionShare>,
    pub time_patterns: Vec<TimePattern>,
    pub day_patterns: Vec<DayPattern>,
    pub trends: Vec<TrendPoint>,
    pub statistics: Statistics,
    pub insights: Vec<InsightItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One emotion's share of the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionShare {
    pub emotion: String,
    pub count: usize,
    pub percentage: f64,
    pub avg_intensity: f64,
}

/// Emotion counts for one hour of the day (0-23)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePattern {
    pub hour: u32,
    pub emotions: BTreeMap<String, usize>,
    pub dominant_emotion: String,
}

/// Emotion counts for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPattern {
    pub day: String,
    pub emotions: BTreeMap<String, usize>,
    pub dominant_emotion: String,
}

/// Per-week, per-emotion aggregate; `period` is the week's Sunday (YYYY-MM-DD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub period: String,
    pub emotion: String,
    pub avg_intensity: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub most_common_emotion: String,
    pub average_intensity: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub positive_percentage: f64,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            most_common_emotion: "none".to_string(),
            average_intensity: 0.0,
            current_streak: 0,
            longest_streak: 0,
            positive_percentage: 0.0,
        }
    }
}

/// Category of an insight card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Achievement,
    Trend,
    Pattern,
    Recommendation,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Achievement => "achievement",
            InsightKind::Trend => "trend",
            InsightKind::Pattern => "pattern",
            InsightKind::Recommendation => "recommendation",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "achievement" => Ok(InsightKind::Achievement),
            "trend" => Ok(InsightKind::Trend),
            "pattern" => Ok(InsightKind::Pattern),
            "recommendation" => Ok(InsightKind::Recommendation),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// A human-readable insight; lower `priority` is shown first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightItem {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub priority: u8,
}

impl InsightItem {
    pub fn new(
        kind: InsightKind,
        priority: u8,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            priority,
        }
    }
}
