//! Real-time extrapolation of debt growth from quarterly records.

use chrono::NaiveDateTime;

use crate::domain::{AccrualRates, CombinedRecord, RealtimeSnapshot, round_to};

/// Annual growth rate (%) used when the records cannot support an estimate.
pub const DEFAULT_ANNUAL_RATE: f64 = 3.5;

/// The rate compares the last record with the one this many positions from the end
/// (four quarters apart).
const GROWTH_WINDOW: usize = 5;

/// Year-over-year growth of the debt amount, in percent.
pub fn annual_growth_rate(records: &[CombinedRecord]) -> f64 {
    if records.len() < GROWTH_WINDOW {
        return DEFAULT_ANNUAL_RATE;
    }

    let prior = records[records.len() - GROWTH_WINDOW].debt_amount;
    let last = records[records.len() - 1].debt_amount;
    match (prior, last) {
        (Some(prior), Some(last)) if prior > 0.0 && last.is_finite() => (last - prior) / prior * 100.0,
        _ => DEFAULT_ANNUAL_RATE,
    }
}

/// Accrual speed (billions of euros) for a debt `amount` growing at `rate_pct` per year.
pub fn accrual_rates(amount: f64, rate_pct: f64) -> AccrualRates {
    let per_day = amount * rate_pct / 100.0 / 365.0;
    let per_hour = per_day / 24.0;
    let per_minute = per_hour / 60.0;
    AccrualRates {
        per_day: round_to(per_day, 2),
        per_hour: round_to(per_hour, 4),
        per_minute: round_to(per_minute, 6),
    }
}

/// Snapshot of the latest record for the real-time clock (`None` without records).
pub fn realtime_snapshot(records: &[CombinedRecord], now: NaiveDateTime) -> Option<RealtimeSnapshot> {
    let latest = records.last()?;
    let rate = annual_growth_rate(records);
    let accrual = accrual_rates(latest.debt_amount.unwrap_or(0.0), rate);

    Some(RealtimeSnapshot {
        last_update: now,
        debt_amount: latest.debt_amount,
        debt_to_gdp_pct: latest.debt_to_gdp_pct,
        period: latest.period.clone(),
        annual_growth_rate_pct: round_to(rate, 2),
        accrual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records(amounts: &[Option<f64>]) -> Vec<CombinedRecord> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| CombinedRecord {
                period: format!("2023-Q{}", i % 4 + 1),
                debt_to_gdp_pct: Some(110.0),
                debt_amount: *amount,
            })
            .collect()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn few_records_fall_back_to_default_rate() {
        assert_eq!(annual_growth_rate(&[]), DEFAULT_ANNUAL_RATE);
        let four = records(&[Some(3000.0), Some(3010.0), Some(3020.0), Some(3030.0)]);
        assert_eq!(annual_growth_rate(&four), DEFAULT_ANNUAL_RATE);
    }

    #[test]
    fn non_positive_prior_falls_back_to_default_rate() {
        let zero = records(&[Some(0.0), Some(1.0), Some(2.0), Some(3.0), Some(3030.0)]);
        assert_eq!(annual_growth_rate(&zero), DEFAULT_ANNUAL_RATE);
        let negative = records(&[Some(-5.0), Some(1.0), Some(2.0), Some(3.0), Some(3030.0)]);
        assert_eq!(annual_growth_rate(&negative), DEFAULT_ANNUAL_RATE);
        let missing = records(&[None, Some(1.0), Some(2.0), Some(3.0), Some(3030.0)]);
        assert_eq!(annual_growth_rate(&missing), DEFAULT_ANNUAL_RATE);
    }

    #[test]
    fn rate_compares_records_five_apart() {
        let recs = records(&[
            Some(2900.0),
            Some(3000.0),
            Some(3010.0),
            Some(3015.0),
            Some(3020.0),
            Some(3030.0),
        ]);
        let rate = annual_growth_rate(&recs);
        assert!((rate - 1.0).abs() < 1e-9, "expected 1%, got {rate}");
    }

    #[test]
    fn snapshot_accrual_from_one_percent_growth() {
        let recs = records(&[Some(3000.0), Some(3008.0), Some(3015.0), Some(3022.0), Some(3030.0)]);
        let snap = realtime_snapshot(&recs, now()).unwrap();

        assert!((snap.annual_growth_rate_pct - 1.0).abs() < 1e-9);
        assert_eq!(snap.debt_amount, Some(3030.0));
        // 3030 * 1% / 365 = 0.0830...
        assert!((snap.accrual.per_day - 0.08).abs() < 1e-9);
        assert!((snap.accrual.per_hour - 0.0035).abs() < 1e-9);
        assert!((snap.accrual.per_minute - 0.000058).abs() < 1e-9);
    }

    #[test]
    fn snapshot_needs_at_least_one_record() {
        assert!(realtime_snapshot(&[], now()).is_none());

        let one = records(&[Some(3100.0)]);
        let snap = realtime_snapshot(&one, now()).unwrap();
        assert_eq!(snap.annual_growth_rate_pct, DEFAULT_ANNUAL_RATE);
        // 3100 * 3.5% / 365 = 0.2972...
        assert!((snap.accrual.per_day - 0.30).abs() < 1e-9);
    }
}
