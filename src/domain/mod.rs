//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - series observations (`Observation`) and joined records (`CombinedRecord`)
//! - the two output documents (`OutputDocument`, `RealtimeSnapshot`)
//! - run configuration (`UpdateConfig`, `FailurePolicy`)

pub mod types;

pub use types::*;
