//! Weekly emotion trends

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, TimeZone};

use crate::models::EmotionLog;

use super::types::TrendPoint;

/// The Sunday at or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Per (week, emotion) mean intensity and count
///
/// Sorted by period ascending, then emotion. The period key is a fixed-width
/// ISO date so string order is calendar order.
pub fn weekly_trends<Tz: TimeZone>(records: &[EmotionLog], tz: &Tz) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<(String, String), (usize, u64)> = BTreeMap::new();

    for record in records {
        let local_date = record.timestamp.with_timezone(tz).date_naive();
        let period = week_start(local_date).format("%Y-%m-%d").to_string();

        let (count, sum) = buckets
            .entry((period, record.emotion.clone()))
            .or_insert((0, 0));
        *count += 1;
        *sum += u64::from(record.intensity);
    }

    buckets
        .into_iter()
        .map(|((period, emotion), (count, sum))| TrendPoint {
            period,
            emotion,
            avg_intensity: sum as f64 / count as f64,
            count,
        })
        .collect()
}
