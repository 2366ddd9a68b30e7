//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use flip_core::types::RiskProfile;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flip")]
#[command(author, version, about = "Grand Exchange market analytics and trade accounting")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl From<RiskLevel> for RiskProfile {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => RiskProfile::Low,
            RiskLevel::Medium => RiskProfile::Medium,
            RiskLevel::High => RiskProfile::High,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the market for dumps and flips
    Scan(ScanArgs),
    /// Evaluate a trading signal for one item
    Signal(SignalArgs),
    /// Match a trade log into completed flips
    History(HistoryArgs),
    /// Replay a trade log into the portfolio ledger
    Portfolio(PortfolioArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Snapshot directory (mapping.json, latest.json, 24h.json)
    #[arg(short, long, default_value = "snapshots")]
    pub snapshot: PathBuf,

    /// Named strategy preset from the configuration
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Minimum instant low price
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Maximum instant low price
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Minimum 24h volume
    #[arg(long)]
    pub min_volume: Option<i64>,

    /// Minimum ROI percentage for flips
    #[arg(long)]
    pub min_roi: Option<f64>,

    /// Rows to show per list
    #[arg(short, long, default_value = "10")]
    pub top: usize,

    /// Also show the market highlight boards
    #[arg(long)]
    pub highlights: bool,
}

#[derive(clap::Args)]
pub struct SignalArgs {
    /// Snapshot directory (timeseries-<id>.json)
    #[arg(short, long, default_value = "snapshots")]
    pub snapshot: PathBuf,

    /// Item id to evaluate
    #[arg(short, long)]
    pub item: u32,

    /// Risk profile override
    #[arg(short, long)]
    pub risk: Option<RiskLevel>,
}

#[derive(clap::Args)]
pub struct HistoryArgs {
    /// Trade log file (.csv or .json)
    #[arg(short, long)]
    pub trades: PathBuf,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct PortfolioArgs {
    /// Trade log file (.csv or .json)
    #[arg(short, long)]
    pub trades: PathBuf,

    /// Snapshot directory for valuing open holdings
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Starting cash override
    #[arg(long)]
    pub starting_cash: Option<i64>,
}
