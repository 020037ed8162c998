//! Emotion analytics
//!
//! Turns a wallet's emotion logs over a trailing window into an
//! [`AnalyticsReport`]: emotion distribution, hour-of-day and day-of-week
//! patterns, weekly trends, summary statistics and a list of insights.
//!
//! The computation itself ([`AnalyticsEngine::compute`]) is pure. It takes
//! the records, a frozen `now` and the timezone used for hour/weekday
//! bucketing, so the same inputs always produce the same report.
//!
//! Insights come from [`InsightRule`] trait objects registered on the
//! engine. The built-in rules live in [`rules`].

use chrono::{DateTime, Duration, Utc};

mod distribution;
mod engine;
mod patterns;
pub mod rules;
mod statistics;
mod trends;
mod types;

pub use distribution::emotion_distribution;
pub use engine::AnalyticsEngine;
pub use patterns::{day_patterns, dominant_emotion, time_patterns, weekday_name};
pub use rules::{recommended_game, InsightRule, RuleContext};
pub use statistics::{statistics, streaks, Streaks};
pub use trends::{week_start, weekly_trends};
pub use types::*;

/// Window used when no valid `days` value is supplied
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Longest window accepted; larger requests are capped
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Clamp a window length into `1..=MAX_WINDOW_DAYS`
pub fn normalize_days(days: i64) -> i64 {
    if days > 0 {
        days.min(MAX_WINDOW_DAYS)
    } else {
        DEFAULT_WINDOW_DAYS
    }
}

/// Start of the trailing window ending at `now`
///
/// Falls back to the default window if subtracting `days` would leave
/// chrono's representable range.
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(normalize_days(days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or_else(|| now - Duration::days(DEFAULT_WINDOW_DAYS))
}

/// Parse a `days` query/flag value, falling back to the default window
pub fn parse_days(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(normalize_days)
        .unwrap_or(DEFAULT_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days(Some("7")), 7);
        assert_eq!(parse_days(Some(" 90 ")), 90);
        assert_eq!(parse_days(Some("0")), DEFAULT_WINDOW_DAYS);
        assert_eq!(parse_days(Some("-3")), DEFAULT_WINDOW_DAYS);
        assert_eq!(parse_days(Some("week")), DEFAULT_WINDOW_DAYS);
        assert_eq!(parse_days(None), DEFAULT_WINDOW_DAYS);
    }

    #[test]
    fn test_huge_days_are_capped() {
        assert_eq!(parse_days(Some("100000000")), MAX_WINDOW_DAYS);
        assert_eq!(parse_days(Some("9223372036854775807")), MAX_WINDOW_DAYS);
        assert_eq!(normalize_days(i64::MAX), MAX_WINDOW_DAYS);
    }

    #[test]
    fn test_window_start() {
        let now = chrono::TimeZone::with_ymd_and_hms(&Utc, 2026, 6, 30, 12, 0, 0).unwrap();
        assert_eq!(window_start(now, 7), now - Duration::days(7));
        assert_eq!(window_start(now, -1), now - Duration::days(DEFAULT_WINDOW_DAYS));
        assert_eq!(
            window_start(now, i64::MAX),
            now - Duration::days(MAX_WINDOW_DAYS)
        );

        // Near the bottom of chrono's range the cap still does not fit
        let early = DateTime::<Utc>::MIN_UTC + Duration::days(40);
        assert_eq!(window_start(early, 1000), early - Duration::days(DEFAULT_WINDOW_DAYS));
    }
}
