//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initialises logging
//! - builds the data source (INSEE or demo)
//! - runs the update pipeline and prints a summary
//! - serves the clock and indicators commands

use chrono::{Local, NaiveDateTime, Timelike};
use clap::Parser;

use crate::cli::{ClockArgs, Command, DemoArgs, IndicatorsArgs, OutputArgs, UpdateArgs};
use crate::data::{DemoSource, InseeClient, InseeSettings, InseeSource};
use crate::domain::{FailurePolicy, UpdateConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `dette` binary.
pub fn run() -> Result<(), AppError> {
    // `dette` and `dette --keep 30` behave like `dette update ...`, which is
    // what schedulers call. Clap requires a subcommand name, so the argv list
    // is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cli.command {
        Command::Update(args) => handle_update(args),
        Command::Demo(args) => handle_demo(args),
        Command::Clock(args) => handle_clock(args),
        Command::Watch(args) => crate::tui::run(args),
        Command::Indicators(args) => handle_indicators(args),
    }
}

fn handle_update(args: UpdateArgs) -> Result<(), AppError> {
    let config = update_config_from_args(&args.output, args.on_failure);
    let client = InseeClient::from_env(insee_settings_from_args(&args))?;
    let source = InseeSource::new(client);

    let outcome = pipeline::run_update(&source, &config, now_local())?;
    println!("{}", crate::report::format_update_summary(&outcome));
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = now_local();
    let config = update_config_from_args(&args.output, FailurePolicy::Strict);
    let source = DemoSource::new(now.date());

    log::warn!("Demo mode: writing a synthetic debt trajectory, not INSEE data.");
    let outcome = pipeline::run_update(&source, &config, now)?;
    println!("{}", crate::report::format_update_summary(&outcome));
    Ok(())
}

fn handle_clock(args: ClockArgs) -> Result<(), AppError> {
    let snapshot = crate::io::read_snapshot(&args.output_dir)?;
    let estimate = crate::clock::estimate(&snapshot, now_local(), args.population)?;
    println!("{}", crate::report::format_estimate(&estimate));
    Ok(())
}

fn handle_indicators(args: IndicatorsArgs) -> Result<(), AppError> {
    let indicators = crate::indicators::Indicators::reference();
    println!("{}", crate::report::format_indicators(&indicators));
    if args.csv {
        let path = crate::io::write_indicators_csv(&args.output_dir, &indicators, now_local().date())?;
        println!("Wrote: {}", path.display());
    }
    Ok(())
}

pub fn update_config_from_args(args: &OutputArgs, on_failure: FailurePolicy) -> UpdateConfig {
    UpdateConfig {
        output_dir: args.output_dir.clone(),
        keep_periods: args.keep,
        realtime: !args.no_realtime,
        on_failure,
    }
}

pub fn insee_settings_from_args(args: &UpdateArgs) -> InseeSettings {
    InseeSettings {
        base_url: args.base_url.clone(),
        debt_to_gdp_series: args.pib_series.clone(),
        debt_amount_series: args.montant_series.clone(),
        start_period: args.start_period.clone(),
        detail: args.detail.clone(),
        last_n: (args.last_n > 0).then_some(args.last_n),
        timeout_secs: args.timeout,
    }
}

/// Local wall-clock time truncated to whole seconds.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Rewrite argv so `dette` defaults to `dette update`.
///
/// Rules:
/// - `dette`                         -> `dette update`
/// - `dette --keep 30 ...`           -> `dette update --keep 30 ...`
/// - `dette --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("update".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "update" | "demo" | "clock" | "watch" | "indicators"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "update flags".
    if arg1.starts_with('-') {
        argv.insert(1, "update".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_update() {
        assert_eq!(rewrite_args(args(&["dette"])), args(&["dette", "update"]));
        assert_eq!(
            rewrite_args(args(&["dette", "--keep", "30"])),
            args(&["dette", "update", "--keep", "30"])
        );
        assert_eq!(rewrite_args(args(&["dette", "--help"])), args(&["dette", "--help"]));
        assert_eq!(rewrite_args(args(&["dette", "clock"])), args(&["dette", "clock"]));
        assert_eq!(
            rewrite_args(args(&["dette", "indicators", "--csv"])),
            args(&["dette", "indicators", "--csv"])
        );
    }

    #[test]
    fn indicators_subcommand_parses_csv_flag() {
        let cli = Cli::parse_from(args(&["dette", "indicators", "--csv", "-o", "exports"]));
        let Command::Indicators(ind) = cli.command else {
            panic!("expected indicators subcommand");
        };
        assert!(ind.csv);
        assert_eq!(ind.output_dir, std::path::PathBuf::from("exports"));

        let cli = Cli::parse_from(args(&["dette", "indicators"]));
        let Command::Indicators(ind) = cli.command else {
            panic!("expected indicators subcommand");
        };
        assert!(!ind.csv);
    }

    #[test]
    fn update_flags_map_to_config_and_settings() {
        let cli = Cli::parse_from(rewrite_args(args(&[
            "dette",
            "--output-dir",
            "site",
            "--keep",
            "0",
            "--no-realtime",
            "--last-n",
            "0",
            "--start-period",
            "2019-Q1",
            "--on-failure",
            "fallback",
        ])));
        let Command::Update(update) = cli.command else {
            panic!("expected update subcommand");
        };

        let config = update_config_from_args(&update.output, update.on_failure);
        assert_eq!(config.output_dir, std::path::PathBuf::from("site"));
        assert_eq!(config.keep_periods, 0);
        assert!(!config.realtime);
        assert_eq!(config.on_failure, FailurePolicy::Fallback);

        let settings = insee_settings_from_args(&update);
        assert_eq!(settings.last_n, None);
        assert_eq!(settings.start_period.as_deref(), Some("2019-Q1"));
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.debt_to_gdp_series, "001694056");
    }
}
