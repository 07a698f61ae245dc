//! Command-line parsing for the INSEE debt updater.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pipeline code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::pipeline::DEFAULT_KEEP_PERIODS;
use crate::clock::DEFAULT_POPULATION;
use crate::data::insee::{
    DEFAULT_BASE_URL, DEFAULT_LAST_N, DEFAULT_TIMEOUT_SECS, SERIES_DEBT_AMOUNT, SERIES_DEBT_TO_GDP,
};
use crate::domain::FailurePolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dette", version, about = "French public debt data updater (INSEE-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the INSEE series and rewrite the JSON files (default).
    Update(UpdateArgs),
    /// Write the JSON files from the built-in synthetic trajectory.
    Demo(DemoArgs),
    /// Print the current extrapolated debt from the latest snapshot.
    Clock(ClockArgs),
    /// Launch the live debt clock TUI.
    Watch(ClockArgs),
    /// Print the r - g, redemption schedule, and OAT-Bund spread indicators.
    Indicators(IndicatorsArgs),
}

/// Where and what to write.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Directory receiving `dette_data.json` and `dette_insee_latest.json`.
    #[arg(short = 'o', long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Keep only the most recent N periods in `dette_data.json` (0 keeps all).
    #[arg(long, default_value_t = DEFAULT_KEEP_PERIODS)]
    pub keep: usize,

    /// Do not write the real-time snapshot.
    #[arg(long)]
    pub no_realtime: bool,
}

/// Options for `dette update`.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Base URL of the INSEE BDM series endpoint.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Series ID of the debt in percent of GDP.
    #[arg(long, default_value = SERIES_DEBT_TO_GDP)]
    pub pib_series: String,

    /// Series ID of the debt in billions of euros.
    #[arg(long, default_value = SERIES_DEBT_AMOUNT)]
    pub montant_series: String,

    /// First period to request (e.g. 2019-Q1).
    #[arg(long)]
    pub start_period: Option<String>,

    /// Detail level passed to the API (e.g. dataonly).
    #[arg(long)]
    pub detail: Option<String>,

    /// Number of most recent observations to request (0 requests the full series).
    #[arg(long, default_value_t = DEFAULT_LAST_N)]
    pub last_n: usize,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// What to do when no series can be retrieved.
    #[arg(long, value_enum, default_value_t = FailurePolicy::Strict)]
    pub on_failure: FailurePolicy,
}

/// Options for `dette demo`.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for `dette clock` and `dette watch`.
#[derive(Debug, Parser, Clone)]
pub struct ClockArgs {
    /// Directory holding the files written by `dette update`.
    #[arg(short = 'o', long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Population used for the per-inhabitant figure.
    #[arg(long, default_value_t = DEFAULT_POPULATION, value_parser = clap::value_parser!(u64).range(1..))]
    pub population: u64,
}

/// Options for `dette indicators`.
#[derive(Debug, Parser, Clone)]
pub struct IndicatorsArgs {
    /// Also export the indicators as `dette_publique_indicateurs_<date>.csv`.
    #[arg(long)]
    pub csv: bool,

    /// Directory receiving the CSV export.
    #[arg(short = 'o', long, default_value = "data")]
    pub output_dir: PathBuf,
}
