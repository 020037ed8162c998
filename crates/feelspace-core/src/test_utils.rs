//! Shared helpers for unit tests

use chrono::{DateTime, TimeZone, Utc};

use crate::models::EmotionLog;

/// 2026-06-01 is a Monday
pub fn day_hour(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap()
}

/// An emotion log for wallet `0xtest` at 2026-06-`day` `hour`:00 UTC
pub fn log_at(emotion: &str, intensity: u8, day: u32, hour: u32) -> EmotionLog {
    log_ts(emotion, intensity, day_hour(day, hour))
}

pub fn log_ts(emotion: &str, intensity: u8, timestamp: DateTime<Utc>) -> EmotionLog {
    use std::sync::atomic::{AtomicI64, Ordering};
    static NEXT_ID: AtomicI64 = AtomicI64::new(1);

    EmotionLog {
        id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
        wallet_address: "0xtest".to_string(),
        emotion: emotion.to_string(),
        intensity,
        notes: String::new(),
        timestamp,
    }
}
