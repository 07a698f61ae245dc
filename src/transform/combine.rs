//! Join of the percent-of-GDP and amount series on their period key.

use std::collections::HashMap;

use crate::domain::{CombinedRecord, Observation};

/// Left join driven by `pib`: one record per `pib` entry, in order.
///
/// Periods missing from `montant` get a `null` amount; periods only present
/// in `montant` are dropped.
pub fn combine(pib: &[Observation], montant: &[Observation]) -> Vec<CombinedRecord> {
    let amounts: HashMap<&str, Option<f64>> = montant
        .iter()
        .map(|o| (o.period.as_str(), o.value))
        .collect();

    pib.iter()
        .map(|o| CombinedRecord {
            period: o.period.clone(),
            debt_to_gdp_pct: o.value,
            debt_amount: amounts.get(o.period.as_str()).copied().flatten(),
        })
        .collect()
}

/// Like [`combine`], but lets the amount series drive when the percentage one is empty.
pub fn join_series(pib: &[Observation], montant: &[Observation]) -> Vec<CombinedRecord> {
    if pib.is_empty() && !montant.is_empty() {
        return montant
            .iter()
            .map(|o| CombinedRecord {
                period: o.period.clone(),
                debt_to_gdp_pct: None,
                debt_amount: o.value,
            })
            .collect();
    }
    combine(pib, montant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(period: &str, value: f64) -> Observation {
        Observation::new(period, Some(value))
    }

    #[test]
    fn matching_periods_are_joined() {
        let records = combine(&[obs("2023-Q1", 110.1)], &[obs("2023-Q1", 3000.0)]);
        assert_eq!(
            records,
            vec![CombinedRecord {
                period: "2023-Q1".to_string(),
                debt_to_gdp_pct: Some(110.1),
                debt_amount: Some(3000.0),
            }]
        );
    }

    #[test]
    fn empty_second_sequence_keeps_every_left_record() {
        let pib = vec![obs("2023-Q3", 111.0), obs("2023-Q1", 110.1), obs("2023-Q2", 110.5)];
        let records = combine(&pib, &[]);
        let periods: Vec<&str> = records.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["2023-Q3", "2023-Q1", "2023-Q2"]);
        assert!(records.iter().all(|r| r.debt_amount.is_none()));
    }

    #[test]
    fn right_only_periods_are_dropped() {
        let records = combine(
            &[obs("2023-Q2", 110.5)],
            &[obs("2023-Q1", 3000.0), obs("2023-Q2", 3050.0), obs("2023-Q3", 3090.0)],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].debt_amount, Some(3050.0));
    }

    #[test]
    fn amount_series_drives_when_percentage_missing() {
        let records = join_series(&[], &[obs("2024-Q1", 3160.0), obs("2024-Q2", 3228.4)]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].debt_amount, Some(3228.4));
        assert!(records.iter().all(|r| r.debt_to_gdp_pct.is_none()));
    }
}
