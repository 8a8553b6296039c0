//! Pennywise Core Library
//!
//! Shared functionality for the Pennywise financial analytics tool:
//! - Domain records (transactions, categories, budgets, accounts, investments)
//! - Snapshot loading with boundary validation
//! - Financial predictor (forecasts, anomalies, budget alerts, suggestions)
//! - Predictor configuration with file overrides

pub mod config;
pub mod error;
pub mod models;
pub mod predictor;
pub mod snapshot;

pub use config::PredictorConfig;
pub use error::{Error, Result};
pub use predictor::{
    AnomalyDetection, BudgetAlert, CashFlowSummary, ExpenseForecast, FinancialPredictor,
    InvestmentSuggestion, PredictionReport, RiskLevel, Severity, SuggestionType, Trend,
};
pub use snapshot::FinancialSnapshot;
