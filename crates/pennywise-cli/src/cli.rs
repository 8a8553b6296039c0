//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Pennywise - Forecasts, anomalies and alerts for household finances
#[derive(Parser)]
#[command(name = "pennywise")]
#[command(about = "Predictive analytics for household finances", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Predictor config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options for analyses that only look at history
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// JSON snapshot with transactions, categories, budgets, accounts, investments
    #[arg(short, long)]
    pub input: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Options for analyses anchored on the current month
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// JSON snapshot with transactions, categories, budgets, accounts, investments
    #[arg(short, long)]
    pub input: PathBuf,

    /// Date to analyze as "today" (YYYY-MM-DD, defaults to the local date)
    #[arg(long)]
    pub today: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast next month's spending per expense category
    Forecast {
        #[command(flatten)]
        args: SnapshotArgs,
    },

    /// List unusually large expenses
    Anomalies {
        #[command(flatten)]
        args: SnapshotArgs,
    },

    /// Show budgets at risk this month
    Budgets {
        #[command(flatten)]
        args: AnalysisArgs,
    },

    /// Suggest where to put spare money
    Suggest {
        #[command(flatten)]
        args: AnalysisArgs,
    },

    /// Run every analysis and print a combined report
    Report {
        #[command(flatten)]
        args: AnalysisArgs,
    },

    /// Inspect predictor configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the override file location
    Path,
}
