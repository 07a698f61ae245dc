//! Quarter arithmetic for period labels and publication estimates.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::domain::split_period;

/// INSEE publishes quarterly debt figures roughly this long after the quarter ends.
pub const PUBLICATION_LAG_DAYS: i64 = 90;

/// Calendar quarter (1..=4) of a date.
pub fn quarter_of(date: NaiveDate) -> u8 {
    // month0 is 0..=11, so the result always fits.
    (date.month0() / 3 + 1) as u8
}

/// `YYYY-QN` label of the quarter containing `date`.
pub fn period_label(date: NaiveDate) -> String {
    format!("{}-Q{}", date.year(), quarter_of(date))
}

/// Last day of a calendar quarter.
pub fn quarter_end(year: i32, quarter: u8) -> Option<NaiveDate> {
    let (month, day) = match quarter {
        1 => (3, 31),
        2 => (6, 30),
        3 => (9, 30),
        4 => (12, 31),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Last day covered by a period label (`2024-Q2` -> 2024-06-30, `2024` -> 2024-12-31).
pub fn period_end(period: &str) -> Option<NaiveDate> {
    match split_period(period) {
        (Some(year), Some(quarter)) => quarter_end(year, quarter),
        (Some(year), None) => quarter_end(year, 4),
        _ => None,
    }
}

/// Probable date of the next quarterly publication: end of the current quarter plus the lag.
pub fn next_update_estimate(today: NaiveDate) -> NaiveDateTime {
    let end = quarter_end(today.year(), quarter_of(today)).unwrap_or(today);
    (end + Duration::days(PUBLICATION_LAG_DAYS)).and_time(chrono::NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_label_uses_calendar_quarter() {
        assert_eq!(period_label(date(2024, 1, 1)), "2024-Q1");
        assert_eq!(period_label(date(2024, 8, 15)), "2024-Q3");
        assert_eq!(period_label(date(2024, 12, 31)), "2024-Q4");
    }

    #[test]
    fn next_update_is_quarter_end_plus_lag() {
        let next = next_update_estimate(date(2026, 2, 10));
        assert_eq!(next.to_string(), "2026-06-29 00:00:00");

        let next = next_update_estimate(date(2026, 10, 17));
        assert_eq!(next.date(), date(2027, 3, 31));
    }

    #[test]
    fn period_end_handles_quarters_and_years() {
        assert_eq!(period_end("2025-Q2"), Some(date(2025, 6, 30)));
        assert_eq!(period_end("2023"), Some(date(2023, 12, 31)));
        assert_eq!(period_end("T2 2025"), None);
    }
}
