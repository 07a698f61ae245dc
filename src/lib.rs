//! `dette-publique` library crate.
//!
//! The binary (`dette`) is a thin wrapper around this library so that:
//!
//! - the fetch/combine/write pipeline is testable without spawning processes
//! - data sources can be swapped (INSEE, demo, test fixtures)

pub mod app;
pub mod cli;
pub mod clock;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod io;
pub mod report;
pub mod transform;
pub mod tui;
