//! Advanced debt-dynamics indicators.
//!
//! Three reference tables published alongside the INSEE series:
//!
//! - the `r - g` differential (effective interest rate vs nominal growth)
//! - the medium/long-term redemption schedule against the financing programme
//! - the 10-year OAT-Bund spread against its 5-year range
//!
//! Debt dynamics follow `Δd ≈ (r - g)·d - s`: a non-positive `r - g` means
//! the snowball effect is under control without a primary surplus.

use chrono::NaiveDate;

use crate::domain::round_to;

/// Spread (pp) above which the reading is `Elevated`.
const SPREAD_ELEVATED_PP: f64 = 0.7;
/// Spread (pp) above which the reading is `High`.
const SPREAD_HIGH_PP: f64 = 1.0;

/// One year of the `r - g` table, in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct RateGrowthPoint {
    pub period: String,
    /// Interest charge over average outstanding debt.
    pub effective_rate: f64,
    /// Real growth plus inflation.
    pub nominal_growth: f64,
}

impl RateGrowthPoint {
    /// `r - g`, rounded to one decimal.
    pub fn differential(&self) -> f64 {
        round_to(self.effective_rate - self.nominal_growth, 1)
    }

    pub fn status(&self) -> DifferentialStatus {
        if self.differential() <= 0.0 {
            DifferentialStatus::Favorable
        } else {
            DifferentialStatus::Unfavorable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferentialStatus {
    /// `r - g <= 0`.
    Favorable,
    /// `r - g > 0`: stabilising the ratio needs a primary surplus.
    Unfavorable,
}

impl DifferentialStatus {
    pub fn label(self) -> &'static str {
        match self {
            DifferentialStatus::Favorable => "Favorable",
            DifferentialStatus::Unfavorable => "Défavorable",
        }
    }
}

/// Redemptions due in one year, in billions of euros.
#[derive(Debug, Clone, PartialEq)]
pub struct MaturityYear {
    pub year: i32,
    pub nominal_oat: f64,
    /// Inflation-linked OAT (OATi / OAT€i).
    pub indexed_oat: f64,
}

impl MaturityYear {
    pub fn total(&self) -> f64 {
        round_to(self.nominal_oat + self.indexed_oat, 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaturitySchedule {
    pub years: Vec<MaturityYear>,
    /// Annual issuance programme, in billions of euros.
    pub financing_programme: f64,
}

impl MaturitySchedule {
    pub fn total_redemptions(&self) -> f64 {
        round_to(self.years.iter().map(MaturityYear::total).sum(), 1)
    }

    /// Share of the financing programme absorbed by one year's redemptions, in percent.
    pub fn programme_share(&self, year: &MaturityYear) -> Option<f64> {
        (self.financing_programme > 0.0).then(|| round_to(year.total() / self.financing_programme * 100.0, 1))
    }

    /// Year with the largest redemptions.
    pub fn peak(&self) -> Option<&MaturityYear> {
        self.years.iter().max_by(|a, b| a.total().total_cmp(&b.total()))
    }
}

/// 10-year OAT-Bund spread, in percentage points.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadReading {
    pub current: f64,
    pub average_5y: f64,
    pub min_5y: f64,
    pub max_5y: f64,
    pub as_of: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadLevel {
    Contained,
    Elevated,
    High,
}

impl SpreadLevel {
    pub fn label(self) -> &'static str {
        match self {
            SpreadLevel::Contained => "contained",
            SpreadLevel::Elevated => "elevated",
            SpreadLevel::High => "high",
        }
    }
}

impl SpreadReading {
    pub fn current_bp(&self) -> f64 {
        (self.current * 100.0).round()
    }

    /// Distance to the 5-year average, in basis points.
    pub fn gap_to_average_bp(&self) -> f64 {
        ((self.current - self.average_5y) * 100.0).round()
    }

    pub fn level(&self) -> SpreadLevel {
        if self.current > SPREAD_HIGH_PP {
            SpreadLevel::High
        } else if self.current > SPREAD_ELEVATED_PP {
            SpreadLevel::Elevated
        } else {
            SpreadLevel::Contained
        }
    }

    /// Current spread as a share of the 5-year maximum, in percent.
    pub fn gauge_pct(&self) -> Option<f64> {
        (self.max_5y > 0.0).then(|| round_to(self.current / self.max_5y * 100.0, 1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Indicators {
    pub rate_growth: Vec<RateGrowthPoint>,
    pub schedule: MaturitySchedule,
    pub spread: SpreadReading,
}

impl Indicators {
    /// Figures from INSEE/DG Trésor (general government, 2025-Q2), the AFT
    /// October 2025 schedule, and the PLF 2025 programme.
    pub fn reference() -> Self {
        let rate_growth = [
            ("2020", 1.4, -2.8),
            ("2021", 1.3, 8.5),
            ("2022", 1.5, 5.8),
            ("2023", 2.1, 5.9),
            ("2024", 2.4, 3.2),
            ("2025", 2.6, 2.8),
        ]
        .into_iter()
        .map(|(period, effective_rate, nominal_growth)| RateGrowthPoint {
            period: period.to_string(),
            effective_rate,
            nominal_growth,
        })
        .collect();

        let years = [
            (2025, 145.8, 12.4),
            (2026, 152.3, 14.2),
            (2027, 148.6, 15.8),
            (2028, 142.1, 13.6),
            (2029, 138.5, 11.9),
        ]
        .into_iter()
        .map(|(year, nominal_oat, indexed_oat)| MaturityYear {
            year,
            nominal_oat,
            indexed_oat,
        })
        .collect();

        Self {
            rate_growth,
            schedule: MaturitySchedule {
                years,
                financing_programme: 285.0,
            },
            spread: SpreadReading {
                current: 0.78,
                average_5y: 0.52,
                min_5y: 0.25,
                max_5y: 1.15,
                as_of: NaiveDate::from_ymd_opt(2025, 10, 14).unwrap_or_default(),
            },
        }
    }

    pub fn latest_rate_growth(&self) -> Option<&RateGrowthPoint> {
        self.rate_growth.last()
    }
}
