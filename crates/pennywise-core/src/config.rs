//! Predictor configuration
//!
//! Every threshold and return assumption the heuristics use lives here rather
//! than inline, so a household can tune them without a rebuild.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path (`--config`), or the override in the data dir
//!    (~/.local/share/pennywise/config/predictor.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/predictor.toml");

/// Expense forecaster settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastConfig {
    /// Months of history required before a category is forecast
    pub min_months: usize,
    /// Lower bound for the confidence score
    pub min_confidence: f64,
    /// Confidence for a series too short to measure consistency
    pub single_point_confidence: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_months: 2,
            min_confidence: 0.1,
            single_point_confidence: 0.5,
        }
    }
}

/// Anomaly detector settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyConfig {
    pub z_threshold: f64,
    pub mean_multiplier: f64,
    pub max_results: usize,
    pub reason_scale: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            z_threshold: 2.0,
            mean_multiplier: 1.5,
            max_results: 10,
            reason_scale: 50.0,
        }
    }
}

/// Budget alert settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetConfig {
    pub alert_threshold_percent: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            alert_threshold_percent: 80.0,
        }
    }
}

/// Investment suggestion settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentConfig {
    pub emergency_fund_months: f64,
    pub income_lookback_months: u32,
    pub min_holdings: usize,
    pub diversification_share: f64,
    pub surplus_income_ratio: f64,
    pub emergency_fund_return: f64,
    pub diversification_return: f64,
    pub surplus_return: f64,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            emergency_fund_months: 6.0,
            income_lookback_months: 3,
            min_holdings: 3,
            diversification_share: 0.2,
            surplus_income_ratio: 0.1,
            emergency_fund_return: 0.10,
            diversification_return: 0.12,
            surplus_return: 0.15,
        }
    }
}

/// Full predictor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictorConfig {
    pub forecast: ForecastConfig,
    pub anomaly: AnomalyConfig,
    pub budget: BudgetConfig,
    pub investment: InvestmentConfig,
}

impl PredictorConfig {
    /// Load from the default override location, else the embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit file (which must exist)
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        load_config(Some(path))
    }

    /// Parse a TOML document, filling gaps from the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Serialize the effective configuration back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pennywise").join("config").join("predictor.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<PredictorConfig> {
    let content = match override_path {
        Some(path) => {
            debug!(path = %path.display(), "Loading predictor config");
            fs::read_to_string(path)?
        }
        None => match default_config_path() {
            Some(default_path) if default_path.exists() => {
                match fs::read_to_string(&default_path) {
                    Ok(content) => {
                        debug!(path = %default_path.display(), "Loading predictor config override");
                        content
                    }
                    Err(e) => {
                        warn!(
                            path = %default_path.display(),
                            error = %e,
                            "Failed to read config override, using defaults"
                        );
                        DEFAULT_CONFIG.to_string()
                    }
                }
            }
            _ => DEFAULT_CONFIG.to_string(),
        },
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    anomaly: Option<RawAnomaly>,
    budget: Option<RawBudget>,
    investment: Option<RawInvestment>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    min_months: Option<usize>,
    min_confidence: Option<f64>,
    single_point_confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAnomaly {
    z_threshold: Option<f64>,
    mean_multiplier: Option<f64>,
    max_results: Option<usize>,
    reason_scale: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    alert_threshold_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInvestment {
    emergency_fund_months: Option<f64>,
    income_lookback_months: Option<u32>,
    min_holdings: Option<usize>,
    diversification_share: Option<f64>,
    surplus_income_ratio: Option<f64>,
    emergency_fund_return: Option<f64>,
    diversification_return: Option<f64>,
    surplus_return: Option<f64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<PredictorConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = PredictorConfig::default();

    if let Some(forecast) = raw.forecast {
        let c = &mut config.forecast;
        c.min_months = forecast.min_months.unwrap_or(c.min_months);
        c.min_confidence = forecast.min_confidence.unwrap_or(c.min_confidence);
        c.single_point_confidence = forecast
            .single_point_confidence
            .unwrap_or(c.single_point_confidence);
    }

    if let Some(anomaly) = raw.anomaly {
        let c = &mut config.anomaly;
        c.z_threshold = anomaly.z_threshold.unwrap_or(c.z_threshold);
        c.mean_multiplier = anomaly.mean_multiplier.unwrap_or(c.mean_multiplier);
        c.max_results = anomaly.max_results.unwrap_or(c.max_results);
        c.reason_scale = anomaly.reason_scale.unwrap_or(c.reason_scale);
    }

    if let Some(budget) = raw.budget {
        let c = &mut config.budget;
        c.alert_threshold_percent = budget
            .alert_threshold_percent
            .unwrap_or(c.alert_threshold_percent);
    }

    if let Some(investment) = raw.investment {
        let c = &mut config.investment;
        c.emergency_fund_months = investment
            .emergency_fund_months
            .unwrap_or(c.emergency_fund_months);
        c.income_lookback_months = investment
            .income_lookback_months
            .unwrap_or(c.income_lookback_months);
        c.min_holdings = investment.min_holdings.unwrap_or(c.min_holdings);
        c.diversification_share = investment
            .diversification_share
            .unwrap_or(c.diversification_share);
        c.surplus_income_ratio = investment
            .surplus_income_ratio
            .unwrap_or(c.surplus_income_ratio);
        c.emergency_fund_return = investment
            .emergency_fund_return
            .unwrap_or(c.emergency_fund_return);
        c.diversification_return = investment
            .diversification_return
            .unwrap_or(c.diversification_return);
        c.surplus_return = investment.surplus_return.unwrap_or(c.surplus_return);
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &PredictorConfig) -> Result<()> {
    let non_negative = [
        ("forecast.min_confidence", config.forecast.min_confidence),
        (
            "forecast.single_point_confidence",
            config.forecast.single_point_confidence,
        ),
        ("anomaly.z_threshold", config.anomaly.z_threshold),
        ("anomaly.mean_multiplier", config.anomaly.mean_multiplier),
        ("anomaly.reason_scale", config.anomaly.reason_scale),
        (
            "budget.alert_threshold_percent",
            config.budget.alert_threshold_percent,
        ),
        (
            "investment.emergency_fund_months",
            config.investment.emergency_fund_months,
        ),
        (
            "investment.diversification_share",
            config.investment.diversification_share,
        ),
        (
            "investment.surplus_income_ratio",
            config.investment.surplus_income_ratio,
        ),
    ];

    for (key, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Config(format!(
                "{} must be a non-negative number, got {}",
                key, value
            )));
        }
    }

    let fractions = [
        ("forecast.min_confidence", config.forecast.min_confidence),
        (
            "forecast.single_point_confidence",
            config.forecast.single_point_confidence,
        ),
    ];

    for (key, value) in fractions {
        if value > 1.0 {
            return Err(Error::Config(format!(
                "{} must be between 0 and 1, got {}",
                key, value
            )));
        }
    }

    if config.forecast.min_months < 2 {
        return Err(Error::Config(
            "forecast.min_months must be at least 2".to_string(),
        ));
    }

    if config.investment.income_lookback_months == 0 {
        return Err(Error::Config(
            "investment.income_lookback_months must be at least 1".to_string(),
        ));
    }

    Ok(())
}
