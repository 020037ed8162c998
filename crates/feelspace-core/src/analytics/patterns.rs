//! Time-of-day and day-of-week emotion patterns
//!
//! Records are bucketed by their local hour and weekday in the supplied
//! timezone. Only buckets that saw at least one record are emitted.

use std::collections::BTreeMap;

use chrono::{Datelike, TimeZone, Timelike, Weekday};

use crate::models::EmotionLog;

use super::types::{DayPattern, TimePattern};

type EmotionCounts = BTreeMap<String, usize>;

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Emotion with the highest count; ties go to the alphabetically first name
pub fn dominant_emotion(counts: &EmotionCounts) -> String {
    let mut best: Option<(&str, usize)> = None;
    for (emotion, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((emotion, count)),
        }
    }
    best.map(|(emotion, _)| emotion.to_string())
        .unwrap_or_default()
}

/// Per-hour emotion counts, ordered by hour ascending
pub fn time_patterns<Tz: TimeZone>(records: &[EmotionLog], tz: &Tz) -> Vec<TimePattern> {
    let mut hours: BTreeMap<u32, EmotionCounts> = BTreeMap::new();

    for record in records {
        let hour = record.timestamp.with_timezone(tz).hour();
        *hours
            .entry(hour)
            .or_default()
            .entry(record.emotion.clone())
            .or_default() += 1;
    }

    hours
        .into_iter()
        .map(|(hour, emotions)| TimePattern {
            hour,
            dominant_emotion: dominant_emotion(&emotions),
            emotions,
        })
        .collect()
}

/// Per-weekday emotion counts, in order of each weekday's first appearance
/// in `records`
pub fn day_patterns<Tz: TimeZone>(records: &[EmotionLog], tz: &Tz) -> Vec<DayPattern> {
    let mut days: Vec<(Weekday, EmotionCounts)> = Vec::new();

    for record in records {
        let weekday = record.timestamp.with_timezone(tz).weekday();
        let idx = match days.iter().position(|(d, _)| *d == weekday) {
            Some(idx) => idx,
            None => {
                days.push((weekday, EmotionCounts::new()));
                days.len() - 1
            }
        };
        *days[idx].1.entry(record.emotion.clone()).or_default() += 1;
    }

    days.into_iter()
        .map(|(weekday, emotions)| DayPattern {
            day: weekday_name(weekday).to_string(),
            dominant_emotion: dominant_emotion(&emotions),
            emotions,
        })
        .collect()
}
