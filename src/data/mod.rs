//! Data sources for the debt series.
//!
//! - live INSEE BDM API (`insee`)
//! - payload parsing (`parse`)
//! - synthetic demo trajectory (`demo`)

use crate::domain::{DebtContext, Observation, SeriesKind};

pub mod demo;
pub mod insee;
pub mod parse;

pub use demo::DemoSource;
pub use insee::{InseeClient, InseeSettings, InseeSource};
pub use parse::parse_observations;

/// Anything that can provide the two debt series.
///
/// Sources swallow their own failures: a series that cannot be retrieved or
/// parsed comes back empty.
pub trait DebtSource {
    /// Attribution written into the output document.
    fn label(&self) -> &str;

    /// Observations for one series, sorted by period ascending.
    fn observations(&self, kind: SeriesKind) -> Vec<Observation>;

    /// Optional extra figures carried into the output document.
    fn context(&self) -> Option<DebtContext> {
        None
    }
}
