//! CSV export of the advanced indicators.
//!
//! One row per (indicator, period): the `r - g` table first, then the
//! redemption schedule. The spread is a single reading and is not exported.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;
use crate::indicators::Indicators;

const PCT: &str = "%";
const BILLIONS: &str = "Mds€";

#[derive(Debug, Serialize)]
struct IndicatorRow {
    #[serde(rename = "Indicateur")]
    indicator: &'static str,
    #[serde(rename = "Période")]
    period: String,
    /// Shortest decimal form (`4.2`, `285`), as the web page expects.
    #[serde(rename = "Valeur")]
    value: String,
    #[serde(rename = "Unité")]
    unit: &'static str,
    #[serde(rename = "Source")]
    source: &'static str,
}

/// `dette_publique_indicateurs_YYYY-MM-DD.csv`
pub fn indicators_file_name(date: NaiveDate) -> String {
    format!("dette_publique_indicateurs_{}.csv", date.format("%Y-%m-%d"))
}

fn row(indicator: &'static str, period: impl ToString, value: f64, unit: &'static str, source: &'static str) -> IndicatorRow {
    IndicatorRow {
        indicator,
        period: period.to_string(),
        value: value.to_string(),
        unit,
        source,
    }
}

fn rows(indicators: &Indicators) -> Vec<IndicatorRow> {
    let mut out = Vec::new();
    for p in &indicators.rate_growth {
        out.push(row("Taux effectif (r)", &p.period, p.effective_rate, PCT, "INSEE/DGTrésor"));
        out.push(row("Croissance nominale (g)", &p.period, p.nominal_growth, PCT, "INSEE"));
        out.push(row("Différentiel (r-g)", &p.period, p.differential(), PCT, "Calcul"));
    }
    for y in &indicators.schedule.years {
        out.push(row("OAT nominales", y.year, y.nominal_oat, BILLIONS, "AFT"));
        out.push(row("OAT indexées", y.year, y.indexed_oat, BILLIONS, "AFT"));
    }
    out
}

/// Write `dir/dette_publique_indicateurs_<date>.csv` and return its path.
pub fn write_indicators_csv(dir: &Path, indicators: &Indicators, date: NaiveDate) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::io(format!("Failed to create output dir '{}': {e}", dir.display())))?;

    let path = dir.join(indicators_file_name(date));
    let mut writer = csv::Writer::from_path(&path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
    for row in rows(indicators) {
        writer
            .serialize(row)
            .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;

    log::info!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 17).unwrap()
    }

    #[test]
    fn csv_lists_rate_growth_then_schedule() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");
        let path = write_indicators_csv(&dir, &Indicators::reference(), date()).unwrap();
        assert_eq!(path, dir.join("dette_publique_indicateurs_2025-10-17.csv"));

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // Header, 6 periods x 3 rate rows, 5 years x 2 schedule rows.
        assert_eq!(lines.len(), 1 + 18 + 10);
        assert_eq!(lines[0], "Indicateur,Période,Valeur,Unité,Source");
        assert_eq!(lines[1], "Taux effectif (r),2020,1.4,%,INSEE/DGTrésor");
        assert_eq!(lines[2], "Croissance nominale (g),2020,-2.8,%,INSEE");
        assert_eq!(lines[3], "Différentiel (r-g),2020,4.2,%,Calcul");
        assert_eq!(lines[19], "OAT nominales,2025,145.8,Mds€,AFT");
        assert_eq!(lines[28], "OAT indexées,2029,11.9,Mds€,AFT");
    }

    #[test]
    fn whole_values_have_no_trailing_zero() {
        let mut ind = Indicators::reference();
        ind.schedule.years.truncate(1);
        ind.schedule.years[0].nominal_oat = 150.0;
        let exported = rows(&ind);
        let nominal = exported.iter().find(|r| r.indicator == "OAT nominales").unwrap();
        assert_eq!(nominal.value, "150");
    }
}
