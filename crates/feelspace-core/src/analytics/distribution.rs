//! Emotion distribution: count, share and mean intensity per emotion

use std::collections::BTreeMap;

use crate::models::EmotionLog;

use super::types::EmotionShare;

#[derive(Default)]
struct Accumulator {
    count: usize,
    intensity_sum: u64,
}

/// Group records by emotion, sorted by count descending
///
/// Ties keep emotion-name order (the grouping map is ordered by name and the
/// sort is stable).
pub fn emotion_distribution(records: &[EmotionLog]) -> Vec<EmotionShare> {
    let total = records.len();
    if total == 0 {
        return Vec::new();
    }

    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for record in records {
        let acc = groups.entry(record.emotion.as_str()).or_default();
        acc.count += 1;
        acc.intensity_sum += u64::from(record.intensity);
    }

    let mut distribution: Vec<EmotionShare> = groups
        .into_iter()
        .map(|(emotion, acc)| EmotionShare {
            emotion: emotion.to_string(),
            count: acc.count,
            percentage: acc.count as f64 / total as f64 * 100.0,
            avg_intensity: acc.intensity_sum as f64 / acc.count as f64,
        })
        .collect();

    distribution.sort_by(|a, b| b.count.cmp(&a.count));
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::log_at;

    #[test]
    fn test_empty_distribution() {
        assert!(emotion_distribution(&[]).is_empty());
    }

    #[test]
    fn test_distribution_counts_and_averages() {
        let records = vec![
            log_at("sad", 2, 1, 9),
            log_at("happy", 8, 1, 10),
            log_at("happy", 6, 2, 10),
            log_at("calm", 5, 3, 10),
            log_at("happy", 7, 4, 10),
        ];

        let dist = emotion_distribution(&records);
        assert_eq!(dist.len(), 3);

        assert_eq!(dist[0].emotion, "happy");
        assert_eq!(dist[0].count, 3);
        assert!((dist[0].percentage - 60.0).abs() < 1e-9);
        assert!((dist[0].avg_intensity - 7.0).abs() < 1e-9);

        let total: usize = dist.iter().map(|d| d.count).sum();
        assert_eq!(total, records.len());
        let pct: f64 = dist.iter().map(|d| d.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_ties_break_by_name() {
        let records = vec![
            log_at("tired", 3, 1, 9),
            log_at("angry", 3, 1, 10),
            log_at("calm", 3, 1, 11),
        ];

        let names: Vec<_> = emotion_distribution(&records)
            .into_iter()
            .map(|d| d.emotion)
            .collect();
        assert_eq!(names, vec!["angry", "calm", "tired"]);
    }
}
