//! Shared "update pipeline" logic used by the `update` and `demo` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> parse -> combine -> (extrapolate) -> write
//!
//! The data source decides where observations come from (INSEE or demo); the
//! configuration decides truncation, the real-time snapshot, and what happens
//! when no data is available at all.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::data::DebtSource;
use crate::domain::{
    CombinedRecord, FailurePolicy, Metadata, OutputDocument, RealtimeSnapshot, SeriesKind, UpdateConfig,
};
use crate::error::AppError;
use crate::io::output::{write_document, write_snapshot};
use crate::transform::{join_series, keep_latest, next_update_estimate, period_label, realtime_snapshot};

/// Default number of periods kept in the output document.
pub const DEFAULT_KEEP_PERIODS: usize = 22;

pub const FALLBACK_SOURCE: &str = "Données d'exemple";
const FALLBACK_DEBT_TO_GDP: f64 = 112.0;
const FALLBACK_DEBT_AMOUNT: f64 = 3100.0;

/// All outputs of a single update run.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub document: OutputDocument,
    pub snapshot: Option<RealtimeSnapshot>,
    pub document_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
    /// Number of joined periods before truncation.
    pub total_periods: usize,
    pub used_fallback: bool,
}

/// Execute the full update pipeline against `source` and write the files.
pub fn run_update(
    source: &dyn DebtSource,
    config: &UpdateConfig,
    now: NaiveDateTime,
) -> Result<UpdateOutcome, AppError> {
    // 1) Fetch + parse both series.
    let pib = source.observations(SeriesKind::DebtToGdp);
    let montant = source.observations(SeriesKind::DebtAmount);
    log::info!(
        "{}: {} observations, {}: {} observations",
        SeriesKind::DebtToGdp.display_name(),
        pib.len(),
        SeriesKind::DebtAmount.display_name(),
        montant.len(),
    );

    // 2) Combine, or apply the failure policy when nothing came back.
    let (records, source_label, context, used_fallback) = if pib.is_empty() && montant.is_empty() {
        match config.on_failure {
            FailurePolicy::Strict => {
                return Err(AppError::no_data(
                    "Unable to retrieve debt data from any series.",
                ));
            }
            FailurePolicy::Fallback => {
                log::warn!("No data retrieved; writing the minimal fallback dataset.");
                (fallback_records(now), FALLBACK_SOURCE.to_string(), None, true)
            }
        }
    } else {
        (join_series(&pib, &montant), source.label().to_string(), source.context(), false)
    };

    // 3) Extrapolate from the full history, then truncate for the page.
    let snapshot = if config.realtime {
        realtime_snapshot(&records, now)
    } else {
        None
    };

    let document = OutputDocument {
        last_update: now,
        source: source_label,
        data: keep_latest(&records, config.keep_periods),
        metadata: Metadata::quarterly(next_update_estimate(now.date())),
        context,
    };

    // 4) Write.
    let document_path = write_document(&config.output_dir, &document)?;
    let snapshot_path = snapshot
        .as_ref()
        .map(|s| write_snapshot(&config.output_dir, s))
        .transpose()?;

    Ok(UpdateOutcome {
        document,
        snapshot,
        document_path,
        snapshot_path,
        total_periods: records.len(),
        used_fallback,
    })
}

/// The minimal one-record dataset for the current quarter.
pub fn fallback_records(now: NaiveDateTime) -> Vec<CombinedRecord> {
    vec![CombinedRecord {
        period: period_label(now.date()),
        debt_to_gdp_pct: Some(FALLBACK_DEBT_TO_GDP),
        debt_amount: Some(FALLBACK_DEBT_AMOUNT),
    }]
}
