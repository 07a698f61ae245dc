//! Input/output helpers.
//!
//! - output document and snapshot JSON read/write (`output`)
//! - indicators CSV export (`indicators_csv`)

pub mod indicators_csv;
pub mod output;

pub use indicators_csv::write_indicators_csv;
pub use output::*;
