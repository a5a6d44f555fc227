//! CLI argument definitions for limitup.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run [DATE]` | Select the day's limit-up winners and save them |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--mock` | `false` | Use built-in sample data instead of KRX/Naver |
//! | `--timeout-ms` | `10000` | Deadline per provider request |
//! | `--log-level` | `info` | Base log level (`RUST_LOG` overrides) |
//! | `--log-format` | `pretty` | `pretty` or `json` |
//!
//! # Examples
//!
//! ```bash
//! # Today's winners (KST calendar date)
//! limitup run
//!
//! # A specific session, written under ./reports
//! limitup run 20250618 --output-dir reports
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use limitup_core::{ValueBasis, DEFAULT_HEADLINE_LIMIT, LIMIT_UP_THRESHOLD_PCT};

use crate::logging::LogFormat;

/// Daily KOSPI/KOSDAQ limit-up picker.
#[derive(Debug, Parser)]
#[command(
    name = "limitup",
    author,
    version,
    about = "Pick the top-traded limit-up stock per board for a trading day",
    long_about = "limitup scans one trading day's KRX listings for stocks that closed at or \
above +29.5%, keeps the highest trading value on each of KOSPI and KOSDAQ, attaches recent \
Naver Finance headlines and saves the pair as up_stocks_<YYYYMMDD>.json."
)]
pub struct Cli {
    /// Serve market data and news from the built-in sample session.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Deadline for each provider request in milliseconds (at least 1).
    #[arg(
        long,
        global = true,
        default_value_t = 10_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Base log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select and save the limit-up winners for a date.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Trading date as YYYYMMDD. Defaults to today in Korea Standard Time.
    pub date: Option<String>,

    /// Directory that receives up_stocks_<DATE>.json.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Headlines kept per winner.
    #[arg(long, default_value_t = DEFAULT_HEADLINE_LIMIT)]
    pub headlines: usize,

    /// Ranking figure for trading value.
    #[arg(long, value_enum, default_value_t = ValueBasisArg::CloseTimesVolume)]
    pub value_basis: ValueBasisArg,

    /// Diagnostic override of the inclusive limit-up threshold in percent.
    ///
    /// Regular runs keep the 29.5 default.
    #[arg(long, hide = true, default_value_t = LIMIT_UP_THRESHOLD_PCT)]
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueBasisArg {
    /// Close price × volume.
    CloseTimesVolume,
    /// Provider-reported accumulated trading value.
    Reported,
}

impl From<ValueBasisArg> for ValueBasis {
    fn from(value: ValueBasisArg) -> Self {
        match value {
            ValueBasisArg::CloseTimesVolume => Self::CloseTimesVolume,
            ValueBasisArg::Reported => Self::Reported,
        }
    }
}
