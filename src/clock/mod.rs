//! Live debt estimate derived from the real-time snapshot.
//!
//! The snapshot gives the debt at the end of its period and a yearly growth
//! rate; the estimate assumes linear accrual since then.

use chrono::{NaiveDateTime, NaiveTime};

use crate::domain::RealtimeSnapshot;
use crate::error::AppError;
use crate::transform::period_end;

pub const DEFAULT_POPULATION: u64 = 67_000_000;

const EUROS_PER_BILLION: f64 = 1_000_000_000.0;

/// Debt estimate at a given instant, in euros.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtEstimate {
    pub period: String,
    /// Instant the snapshot amount refers to.
    pub reference: NaiveDateTime,
    pub total: f64,
    pub per_capita: f64,
    pub per_second: f64,
    pub per_minute: f64,
    pub per_hour: f64,
    pub per_day: f64,
}

impl DebtEstimate {
    pub fn billions(&self) -> f64 {
        self.total / EUROS_PER_BILLION
    }
}

/// Instant the snapshot amount refers to: end of its period, else the write time.
pub fn reference_time(snapshot: &RealtimeSnapshot) -> NaiveDateTime {
    period_end(&snapshot.period)
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(snapshot.last_update)
}

pub fn estimate(
    snapshot: &RealtimeSnapshot,
    now: NaiveDateTime,
    population: u64,
) -> Result<DebtEstimate, AppError> {
    let amount = snapshot
        .debt_amount
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| AppError::io(format!("Snapshot for {} has no debt amount.", snapshot.period)))?;
    if population == 0 {
        return Err(AppError::io("Population must be > 0."));
    }

    let per_year = amount * EUROS_PER_BILLION * snapshot.annual_growth_rate_pct / 100.0;
    let per_day = per_year / 365.0;
    let per_hour = per_day / 24.0;
    let per_minute = per_hour / 60.0;
    let per_second = per_minute / 60.0;

    let reference = reference_time(snapshot);
    let elapsed_secs = (now - reference).num_milliseconds().max(0) as f64 / 1000.0;
    let total = amount * EUROS_PER_BILLION + elapsed_secs * per_second;

    Ok(DebtEstimate {
        period: snapshot.period.clone(),
        reference,
        total,
        per_capita: total / population as f64,
        per_second,
        per_minute,
        per_hour,
        per_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    use crate::domain::AccrualRates;

    fn snapshot(period: &str, amount: Option<f64>) -> RealtimeSnapshot {
        RealtimeSnapshot {
            last_update: NaiveDate::from_ymd_opt(2025, 10, 2)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap(),
            debt_amount: amount,
            debt_to_gdp_pct: Some(115.6),
            period: period.to_string(),
            annual_growth_rate_pct: 3.65,
            accrual: AccrualRates {
                per_day: 0.34,
                per_hour: 0.0142,
                per_minute: 0.000237,
            },
        }
    }

    #[test]
    fn accrues_linearly_from_period_end() {
        let snap = snapshot("2025-Q2", Some(3000.0));
        let reference = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap().and_time(NaiveTime::MIN);
        assert_eq!(reference_time(&snap), reference);

        let est = estimate(&snap, reference + Duration::days(1), 60_000_000).unwrap();
        // 3000 Md€ * 3.65% / 365 = 0.3 Md€ per day.
        assert!((est.per_day - 300_000_000.0).abs() < 1e-3);
        assert!((est.total - 3_000_300_000_000.0).abs() < 1.0);
        assert!((est.billions() - 3000.3).abs() < 1e-6);
        assert!((est.per_capita - 50_005.0).abs() < 1e-3);
        assert!((est.per_second * 86_400.0 - est.per_day).abs() < 1e-3);
    }

    #[test]
    fn unparsable_period_uses_write_time_and_never_goes_backwards() {
        let snap = snapshot("dernier trimestre", Some(3000.0));
        assert_eq!(reference_time(&snap), snap.last_update);

        let before = snap.last_update - Duration::hours(3);
        let est = estimate(&snap, before, DEFAULT_POPULATION).unwrap();
        assert!((est.total - 3_000_000_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn missing_amount_is_an_error() {
        let snap = snapshot("2025-Q2", None);
        assert!(estimate(&snap, snap.last_update, DEFAULT_POPULATION).is_err());
    }
}
