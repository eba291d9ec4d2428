//! Feature builder: combines a weather reading with time-derived fields

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::weather::WeatherReading;

/// Input record for the congestion classifier.
///
/// Exactly one instance exists per refresh cycle; it is consumed by the
/// classifier immediately after construction and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Rainfall over the last hour in mm
    pub rain_1h: f64,
    /// Snowfall over the last hour in mm
    pub snow_1h: f64,
    /// Cloud cover percentage (0-100)
    pub cloud_cover_pct: u8,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Day of week, Monday = 0 through Sunday = 6
    pub day_of_week: u32,
    /// Month of year (1-12)
    pub month: u32,
    /// True iff day_of_week is Saturday or Sunday
    pub is_weekend: bool,
}

impl FeatureRecord {
    /// Build the feature record for one refresh cycle.
    ///
    /// Pure function of its two inputs: identical (reading, timestamp) pairs
    /// always yield identical records.
    #[must_use]
    pub fn build(reading: &WeatherReading, now: NaiveDateTime) -> Self {
        let day_of_week = now.weekday().num_days_from_monday();

        Self {
            temperature: reading.temperature,
            rain_1h: reading.rain_1h,
            snow_1h: reading.snow_1h,
            cloud_cover_pct: reading.cloud_cover_pct,
            hour: now.hour(),
            day_of_week,
            month: now.month(),
            is_weekend: day_of_week >= 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn reading() -> WeatherReading {
        WeatherReading {
            temperature: 32.0,
            rain_1h: 0.0,
            snow_1h: 0.0,
            cloud_cover_pct: 80,
        }
    }

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_friday_evening_scenario() {
        // 2026-08-28 is a Friday
        let record = FeatureRecord::build(&reading(), at(2026, 8, 28, 18));

        assert_eq!(record.temperature, 32.0);
        assert_eq!(record.rain_1h, 0.0);
        assert_eq!(record.snow_1h, 0.0);
        assert_eq!(record.cloud_cover_pct, 80);
        assert_eq!(record.hour, 18);
        assert_eq!(record.day_of_week, 4);
        assert_eq!(record.month, 8);
        assert!(!record.is_weekend);
    }

    #[rstest]
    // week of 2026-08-24 (Monday) through 2026-08-30 (Sunday)
    #[case(24, 0, false)]
    #[case(25, 1, false)]
    #[case(26, 2, false)]
    #[case(27, 3, false)]
    #[case(28, 4, false)]
    #[case(29, 5, true)]
    #[case(30, 6, true)]
    fn test_weekend_flag(#[case] day: u32, #[case] expected_dow: u32, #[case] weekend: bool) {
        let record = FeatureRecord::build(&reading(), at(2026, 8, day, 12));
        assert_eq!(record.day_of_week, expected_dow);
        assert_eq!(record.is_weekend, weekend);
    }

    #[test]
    fn test_build_is_idempotent() {
        let timestamp = at(2026, 8, 28, 18);
        let first = FeatureRecord::build(&reading(), timestamp);
        let second = FeatureRecord::build(&reading(), timestamp);
        assert_eq!(first, second);
    }

    #[test]
    fn test_midnight_and_december_bounds() {
        let record = FeatureRecord::build(&reading(), at(2026, 12, 31, 0));
        assert_eq!(record.hour, 0);
        assert_eq!(record.month, 12);
    }
}
