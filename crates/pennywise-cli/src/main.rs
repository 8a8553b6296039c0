//! Pennywise CLI - Predictive analytics for household finances
//!
//! Usage:
//!   pennywise forecast --input snapshot.json      Forecast next month's spending
//!   pennywise anomalies --input snapshot.json     Find unusual expenses
//!   pennywise budgets --input snapshot.json       Budgets at risk this month
//!   pennywise suggest --input snapshot.json       Investment suggestions
//!   pennywise report --input snapshot.json        All of the above

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Forecast { args } => commands::cmd_forecast(config, &args),
        Commands::Anomalies { args } => commands::cmd_anomalies(config, &args),
        Commands::Budgets { args } => commands::cmd_budgets(config, &args),
        Commands::Suggest { args } => commands::cmd_suggest(config, &args),
        Commands::Report { args } => commands::cmd_report(config, &args),
        Commands::Config { action } => match action {
            None | Some(ConfigAction::Show) => commands::cmd_config_show(config),
            Some(ConfigAction::Path) => commands::cmd_config_path(),
        },
    }
}
