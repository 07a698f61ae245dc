//! Shared domain types.
//!
//! These types are serialized as-is into the JSON files consumed by the web
//! page, so their wire names follow the page's (French) keys while the Rust
//! field names stay descriptive.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which INSEE series an observation sequence comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Maastricht debt as a percentage of GDP.
    DebtToGdp,
    /// Maastricht debt in billions of euros.
    DebtAmount,
}

impl SeriesKind {
    /// Human-readable label for logs and terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            SeriesKind::DebtToGdp => "Dette publique / PIB",
            SeriesKind::DebtAmount => "Dette publique (Mds€)",
        }
    }
}

/// What to do when neither series yields a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Abort with a non-zero exit code; nothing is written.
    Strict,
    /// Write the hard-coded minimal document for the current quarter.
    Fallback,
}

/// One (period, value) point of a statistical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Provider period label, e.g. `2024-Q3` or `2024`.
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    pub value: Option<f64>,
}

impl Observation {
    /// Build an observation, splitting compound periods into year/quarter.
    pub fn new(period: impl Into<String>, value: Option<f64>) -> Self {
        let period = period.into();
        let (year, quarter) = split_period(&period);
        Self {
            period,
            year,
            quarter,
            value,
        }
    }
}

/// A period with both series joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRecord {
    pub period: String,
    #[serde(rename = "dette_pib")]
    pub debt_to_gdp_pct: Option<f64>,
    /// Billions of euros.
    #[serde(rename = "dette_montant")]
    pub debt_amount: Option<f64>,
}

/// Units and schedule attached to the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "unite_montant")]
    pub amount_unit: String,
    #[serde(rename = "unite_pib")]
    pub gdp_unit: String,
    #[serde(rename = "frequence")]
    pub frequency: String,
    #[serde(rename = "prochain_update")]
    pub next_update: NaiveDateTime,
}

impl Metadata {
    pub fn quarterly(next_update: NaiveDateTime) -> Self {
        Self {
            amount_unit: "milliards_euros".to_string(),
            gdp_unit: "pourcentage".to_string(),
            frequency: "trimestrielle".to_string(),
            next_update,
        }
    }
}

/// Who holds the debt, in percent of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holders {
    pub non_residents: f64,
    #[serde(rename = "assurances")]
    pub insurers: f64,
    #[serde(rename = "banques")]
    pub banks: f64,
    #[serde(rename = "opcvm")]
    pub funds: f64,
    #[serde(rename = "autres")]
    pub others: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Extra figures only the demo source provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtContext {
    /// Millions of inhabitants.
    pub population: f64,
    /// GDP in billions of euros.
    pub pib: f64,
    pub holders: Holders,
    /// Primary balance in percent of GDP.
    pub primary_balance: Vec<YearValue>,
}

/// The `dette_data.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub last_update: NaiveDateTime,
    pub source: String,
    pub data: Vec<CombinedRecord>,
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<DebtContext>,
}

/// Accrual speed of the debt, in billions of euros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccrualRates {
    #[serde(rename = "parJour")]
    pub per_day: f64,
    #[serde(rename = "parHeure")]
    pub per_hour: f64,
    #[serde(rename = "parMinute")]
    pub per_minute: f64,
}

/// The `dette_insee_latest.json` document driving the real-time clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeSnapshot {
    #[serde(rename = "derniereMiseAJour")]
    pub last_update: NaiveDateTime,
    #[serde(rename = "dette")]
    pub debt_amount: Option<f64>,
    #[serde(rename = "dettePIB")]
    pub debt_to_gdp_pct: Option<f64>,
    #[serde(rename = "periode")]
    pub period: String,
    #[serde(rename = "tauxAugmentationAnnuel")]
    pub annual_growth_rate_pct: f64,
    #[serde(rename = "vitesse")]
    pub accrual: AccrualRates,
}

/// A full update run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    pub output_dir: PathBuf,
    /// Keep only the most recent N periods in the document (0 keeps all).
    pub keep_periods: usize,
    /// Also write the real-time snapshot.
    pub realtime: bool,
    pub on_failure: FailurePolicy,
}

/// Split a period label into numeric year and quarter.
///
/// `"2024-Q3"` gives `(Some(2024), Some(3))`, `"2024"` gives `(Some(2024), None)`,
/// anything else gives `(None, None)`.
pub fn split_period(period: &str) -> (Option<i32>, Option<u8>) {
    let trimmed = period.trim();
    if let Some((year, quarter)) = trimmed.split_once("-Q") {
        let year = year.parse::<i32>().ok();
        let quarter = quarter.parse::<u8>().ok().filter(|q| (1..=4).contains(q));
        return match (year, quarter) {
            (Some(y), Some(q)) => (Some(y), Some(q)),
            _ => (None, None),
        };
    }
    if trimmed.len() == 4 {
        if let Ok(year) = trimmed.parse::<i32>() {
            return (Some(year), None);
        }
    }
    (None, None)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
