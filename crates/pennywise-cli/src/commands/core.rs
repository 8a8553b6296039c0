//! Shared utilities for analysis commands
//!
//! This module contains:
//! - `load_predictor` - Build a predictor from the resolved config
//! - `load_snapshot` - Read the input snapshot
//! - `resolve_today` - Parse `--today` or fall back to the local date

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pennywise_core::{FinancialPredictor, FinancialSnapshot, PredictorConfig};

/// Resolve configuration: explicit path, else override/defaults
pub fn load_config(config_path: Option<&Path>) -> Result<PredictorConfig> {
    match config_path {
        Some(path) => PredictorConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => PredictorConfig::load().context("Failed to load predictor config"),
    }
}

pub fn load_predictor(config_path: Option<&Path>) -> Result<FinancialPredictor> {
    let config = load_config(config_path)?;
    tracing::debug!(config = ?config_path, "Predictor config resolved");
    Ok(FinancialPredictor::with_config(config))
}

pub fn load_snapshot(path: &Path) -> Result<FinancialSnapshot> {
    FinancialSnapshot::load(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))
}

pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --today date format (use YYYY-MM-DD)"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
