//! Summary statistics and logging streaks

use chrono::{DateTime, Utc};

use crate::models::{is_positive, EmotionLog};

use super::types::{EmotionShare, Statistics};

/// Streak lengths in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
}

/// Walk records in time order, counting consecutive 24h steps
///
/// `dayDiff` is the whole number of 24h periods between adjacent records:
/// - `1` extends the running streak
/// - `> 1` resets it to 1
/// - `0` (several logs within a day) leaves it unchanged
///
/// The current streak is the running counter at the end of the walk when the
/// latest record is at most one day old, otherwise 0. It is not recomputed
/// backwards from `now`.
pub fn streaks(records: &[EmotionLog], now: DateTime<Utc>) -> Streaks {
    let mut times: Vec<DateTime<Utc>> = records.iter().map(|r| r.timestamp).collect();
    times.sort();

    let Some(&last) = times.last() else {
        return Streaks::default();
    };

    let mut running: u32 = 1;
    let mut longest: u32 = 1;

    for pair in times.windows(2) {
        let day_diff = (pair[1] - pair[0]).num_days();
        if day_diff == 1 {
            running += 1;
            longest = longest.max(running);
        } else if day_diff > 1 {
            running = 1;
        }
    }

    let current = if (now - last).num_days() <= 1 {
        running
    } else {
        0
    };

    Streaks { current, longest }
}

/// Percentage of records whose emotion is in the positive set
pub fn positive_percentage(records: &[EmotionLog]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let positive = records.iter().filter(|r| is_positive(&r.emotion)).count();
    positive as f64 / records.len() as f64 * 100.0
}

pub fn average_intensity(records: &[EmotionLog]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: u64 = records.iter().map(|r| u64::from(r.intensity)).sum();
    sum as f64 / records.len() as f64
}

pub fn statistics(
    records: &[EmotionLog],
    distribution: &[EmotionShare],
    now: DateTime<Utc>,
) -> Statistics {
    if records.is_empty() {
        return Statistics::default();
    }

    let streaks = streaks(records, now);

    Statistics {
        most_common_emotion: distribution
            .first()
            .map(|d| d.emotion.clone())
            .unwrap_or_else(|| "none".to_string()),
        average_intensity: average_intensity(records),
        current_streak: streaks.current,
        longest_streak: streaks.longest,
        positive_percentage: positive_percentage(records),
    }
}
