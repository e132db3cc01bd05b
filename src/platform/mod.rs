//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall clock time
//! - Image decoding (browser only)
//! - Interval timers (browser only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use chrono::{DateTime, NaiveDate, Utc};

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Convert an epoch timestamp (ms) to a UTC datetime
pub fn datetime_from_ms(ms: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms as i64).unwrap_or_default()
}

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    datetime_from_ms(now_ms()).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_from_ms() {
        let dt = datetime_from_ms(1_700_000_000_000.0);
        let expected = NaiveDate::from_ymd_opt(2023, 11, 14).unwrap();
        assert_eq!(dt.date_naive(), expected);
    }

    #[test]
    fn test_now_is_after_2024() {
        assert!(now_ms() > 1_704_067_200_000.0);
        assert!(today() >= NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
