//! CLI argument definitions for the `intake` binary.

use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use intake_model::SalesQuery;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "intake",
    version,
    about = "Order intake reference data - query the cached CSV sources",
    long_about = "Query students, customers, stores, products and the sales log.\n\n\
                  Sources are CSV files in the data directory; they are re-read only\n\
                  when their modification time or content changes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Cache configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the source files (overrides the config file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging configuration from the flags.
    ///
    /// `--log-level` beats `-v`/`-q`, and either one disables `RUST_LOG`.
    /// File logs carry timestamps and targets and are never colored unless
    /// `--color always` asks for it.
    #[must_use]
    pub fn log_config(&self, stderr_is_terminal: bool) -> LogConfig {
        let level_filter = match self.log_level {
            Some(level) => level.level_filter(),
            None => self.verbosity.tracing_level_filter(),
        };
        let to_file = self.log_file.is_some();
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => !to_file && stderr_is_terminal,
        };
        LogConfig::default()
            .with_level_filter(level_filter)
            .with_env_filter(!(self.verbosity.is_present() || self.log_level.is_some()))
            .with_format(self.log_format.into())
            .with_timestamps(to_file)
            .with_target(to_file)
            .with_ansi(with_ansi)
            .with_log_file(self.log_file.clone())
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List students, or find one by a fragment of the name.
    Students(NameArgs),

    /// List customers, or find one by exact name.
    Customers(NameArgs),

    /// List stores, or find one by exact name.
    Stores(NameArgs),

    /// List products with their prices, or find one by exact name.
    Products(NameArgs),

    /// Search the sales log, newest first.
    Sales(SalesArgs),

    /// Order counts and totals for today, this week and this month.
    Stats,

    /// Write matching sales to a CSV file.
    Export(ExportArgs),

    /// Append an order read from a JSON file to the sales log.
    Order(OrderArgs),

    /// Cache timestamps and record counts.
    Info,

    /// File-level state of every monitored source.
    Status,

    /// Drop the cache and reload every source.
    Refresh,
}

#[derive(Args)]
pub struct NameArgs {
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct SalesArgs {
    /// Substring of the student name (case-insensitive).
    #[arg(long = "student", value_name = "NAME")]
    pub student: Option<String>,

    /// Substring of the order id (case-insensitive).
    #[arg(long = "order", value_name = "ID")]
    pub order: Option<String>,

    /// First day to include (YYYY-MM-DD or DD/MM/YYYY).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Last day to include, through 23:59:59.
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<String>,
}

impl SalesArgs {
    #[must_use]
    pub fn query(&self) -> SalesQuery {
        SalesQuery {
            student_name: self.student.clone(),
            order_id: self.order.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
        }
    }
}

#[derive(Args)]
pub struct ExportArgs {
    /// Destination CSV file.
    #[arg(long = "out", value_name = "PATH")]
    pub out: PathBuf,

    #[command(flatten)]
    pub filter: SalesArgs,
}

#[derive(Args)]
pub struct OrderArgs {
    /// Order payload as submitted by the intake form.
    #[arg(value_name = "JSON_FILE")]
    pub file: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    #[must_use]
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
