//! Reporting utilities: run summaries, clock and indicators output.

pub mod format;

pub use format::{format_estimate, format_fr, format_indicators, format_update_summary};
