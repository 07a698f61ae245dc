//! Synthetic debt trajectory for demo mode.
//!
//! Yearly Q4 points follow a closed-form path from a 1995 baseline with step
//! increases in 2008 (financial crisis) and 2020 (Covid-19), followed by the
//! first three quarters of the current year, which start at that year's level.

use chrono::{Datelike, NaiveDate};

use crate::data::DebtSource;
use crate::domain::{DebtContext, Holders, Observation, SeriesKind, YearValue, round_to};

const SOURCE_LABEL: &str = "Données de démonstration (synthétiques)";

const BASE_YEAR: i32 = 1995;
const BASE_PCT: f64 = 55.5;
const PCT_PER_YEAR: f64 = 1.2;
const STEP_PCT: f64 = 15.0;
const CRISIS_YEAR: i32 = 2008;
const COVID_YEAR: i32 = 2020;

/// Billions of euros per GDP percentage point (GDP ≈ 2639 Md€).
const AMOUNT_PER_PCT: f64 = 26.39;

const QUARTER_PCT_STEP: f64 = 0.2;
const QUARTER_AMOUNT_STEP: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct DemoSource {
    current_year: i32,
}

impl DemoSource {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_year: today.year(),
        }
    }

    fn yearly_pct(year: i32) -> f64 {
        let mut pct = BASE_PCT + f64::from(year - BASE_YEAR) * PCT_PER_YEAR;
        if year >= CRISIS_YEAR {
            pct += STEP_PCT;
        }
        if year >= COVID_YEAR {
            pct += STEP_PCT;
        }
        pct
    }

    /// `(period, pct, amount)` for every synthetic point, oldest first.
    fn points(&self) -> Vec<(String, f64, f64)> {
        let mut out = Vec::new();
        for year in BASE_YEAR..self.current_year {
            let pct = Self::yearly_pct(year);
            out.push((format!("{year}-Q4"), round_to(pct, 1), round_to(pct * AMOUNT_PER_PCT, 1)));
        }

        // Quarters start from the current year's level, Q1 sitting on it.
        let pct = round_to(Self::yearly_pct(self.current_year), 1);
        let amount = round_to(Self::yearly_pct(self.current_year) * AMOUNT_PER_PCT, 1);
        for quarter in 1..=3_u8 {
            let step = f64::from(quarter - 1);
            out.push((
                format!("{}-Q{quarter}", self.current_year),
                round_to(pct + step * QUARTER_PCT_STEP, 1),
                round_to(amount + step * QUARTER_AMOUNT_STEP, 1),
            ));
        }
        out
    }
}

impl DebtSource for DemoSource {
    fn label(&self) -> &str {
        SOURCE_LABEL
    }

    fn observations(&self, kind: SeriesKind) -> Vec<Observation> {
        self.points()
            .into_iter()
            .map(|(period, pct, amount)| {
                let value = match kind {
                    SeriesKind::DebtToGdp => pct,
                    SeriesKind::DebtAmount => amount,
                };
                Observation::new(period, Some(value))
            })
            .collect()
    }

    fn context(&self) -> Option<DebtContext> {
        let primary_balance = (0..5)
            .map(|i| YearValue {
                year: self.current_year - 4 + i,
                value: round_to(-2.5 - f64::from(i) * 0.3, 1),
            })
            .collect();

        Some(DebtContext {
            population: 67.8,
            pib: 2639.1,
            holders: Holders {
                non_residents: 53.3,
                insurers: 19.8,
                banks: 7.1,
                funds: 3.8,
                others: 16.0,
            },
            primary_balance,
        })
    }
}
