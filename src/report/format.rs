//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::UpdateOutcome;
use crate::clock::DebtEstimate;
use crate::indicators::Indicators;

/// Format a number the French way: space-grouped thousands, comma decimals.
pub fn format_fr(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::new();
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map(|v| format_fr(v, decimals)).unwrap_or_else(|| "-".to_string())
}

/// Summary printed after an update run.
pub fn format_update_summary(outcome: &UpdateOutcome) -> String {
    let doc = &outcome.document;
    let mut out = String::new();

    out.push_str("=== dette - French public debt (INSEE) ===\n");
    out.push_str(&format!("Source: {}\n", doc.source));
    if outcome.used_fallback {
        out.push_str("No series could be retrieved: minimal fallback dataset written.\n");
    }
    out.push_str(&format!(
        "Periods: {} written ({} retrieved)\n",
        doc.data.len(),
        outcome.total_periods
    ));

    if let Some(latest) = doc.data.last() {
        out.push_str(&format!(
            "Latest: {} | {} % of GDP | {} Md€\n",
            latest.period,
            fmt_opt(latest.debt_to_gdp_pct, 1),
            fmt_opt(latest.debt_amount, 1),
        ));
    }

    if let Some(snap) = &outcome.snapshot {
        out.push_str(&format!(
            "Growth: {} %/year | +{} Md€/day\n",
            format_fr(snap.annual_growth_rate_pct, 2),
            format_fr(snap.accrual.per_day, 2),
        ));
    }

    out.push_str(&format!("Next INSEE release (est.): {}\n", doc.metadata.next_update.date()));
    out.push_str(&format!("Wrote: {}\n", outcome.document_path.display()));
    if let Some(path) = &outcome.snapshot_path {
        out.push_str(&format!("Wrote: {}\n", path.display()));
    }
    out
}

/// One-shot clock output.
pub fn format_estimate(est: &DebtEstimate) -> String {
    let mut out = String::new();
    out.push_str(&format!("Estimated public debt: {} €\n", format_fr(est.total, 0)));
    out.push_str(&format!(
        "  {} Md€ (from {} as of {})\n",
        format_fr(est.billions(), 1),
        est.period,
        est.reference.date(),
    ));
    out.push_str(&format!("Per inhabitant: {} €\n", format_fr(est.per_capita, 0)));
    out.push_str(&format!(
        "Increase: {} €/s | {} €/min | {} €/h | {} €/day\n",
        format_fr(est.per_second, 0),
        format_fr(est.per_minute, 0),
        format_fr(est.per_hour, 0),
        format_fr(est.per_day, 0),
    ));
    out
}

/// `format_fr` with an explicit `+` on positive values.
fn signed_fr(value: f64, decimals: usize) -> String {
    let text = format_fr(value, decimals);
    if value > 0.0 && text != format_fr(0.0, decimals) {
        format!("+{text}")
    } else {
        text
    }
}

/// Output of `dette indicators`.
pub fn format_indicators(ind: &Indicators) -> String {
    let mut out = String::new();
    out.push_str("=== dette - debt dynamics indicators ===\n");

    if let Some(latest) = ind.latest_rate_growth() {
        out.push_str(&format!(
            "r - g ({}): {} % - {} % = {} % | {}\n",
            latest.period,
            format_fr(latest.effective_rate, 1),
            format_fr(latest.nominal_growth, 1),
            signed_fr(latest.differential(), 1),
            latest.status().label(),
        ));
        let history: Vec<String> = ind
            .rate_growth
            .iter()
            .map(|p| format!("{} {}", p.period, signed_fr(p.differential(), 1)))
            .collect();
        out.push_str(&format!("  history: {}\n", history.join(" | ")));
    }

    let schedule = &ind.schedule;
    out.push_str(&format!(
        "Redemptions (Md€, financing programme {} Md€/year):\n",
        format_fr(schedule.financing_programme, 0)
    ));
    for year in &schedule.years {
        let share = schedule
            .programme_share(year)
            .map(|s| format!(" ({} % of programme)", format_fr(s, 1)))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {}  nominal {} | indexed {} | total {}{}\n",
            year.year,
            format_fr(year.nominal_oat, 1),
            format_fr(year.indexed_oat, 1),
            format_fr(year.total(), 1),
            share,
        ));
    }
    if let (Some(first), Some(last)) = (schedule.years.first(), schedule.years.last()) {
        out.push_str(&format!(
            "  {}-{}: {} Md€",
            first.year,
            last.year,
            format_fr(schedule.total_redemptions(), 1)
        ));
        if let Some(peak) = schedule.peak() {
            out.push_str(&format!(" | peak {}", peak.year));
        }
        out.push('\n');
    }

    let spread = &ind.spread;
    out.push_str(&format!(
        "OAT-Bund 10y spread: {} bp ({}) | {} bp vs 5y average {} bp | 5y range {}-{} bp | as of {}\n",
        format_fr(spread.current_bp(), 0),
        spread.level().label(),
        signed_fr(spread.gap_to_average_bp(), 0),
        format_fr(spread.average_5y * 100.0, 0),
        format_fr(spread.min_5y * 100.0, 0),
        format_fr(spread.max_5y * 100.0, 0),
        spread.as_of,
    ));
    out
}
