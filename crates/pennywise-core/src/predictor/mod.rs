//! Financial Predictor - heuristic analytics over household finances
//!
//! Every analysis is a pure function of the caller's data and the configured
//! thresholds: nothing is cached and no input is retained in the results.
//!
//! ## Heuristics
//!
//! - **Expense Forecaster** - Extrapolates next month's spending per category
//! - **Anomaly Detector** - Surfaces unusually large expenses (z-score)
//! - **Budget Alerts** - Projects month-end spending against each budget
//! - **Investment Suggestions** - Rule-based ideas for surplus money
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pennywise_core::{FinancialPredictor, FinancialSnapshot};
//!
//! let snapshot = FinancialSnapshot::load("snapshot.json")?;
//! let predictor = FinancialPredictor::new();
//! let report = predictor.analyze(&snapshot, chrono::Local::now().date_naive());
//! ```

pub mod anomaly;
pub mod budget;
pub mod cash_flow;
pub mod forecast;
pub mod investment;
pub mod period;
pub mod stats;
pub mod types;

use chrono::NaiveDate;
use tracing::info;

use crate::config::PredictorConfig;
use crate::models::{Account, Budget, Category, Investment, Transaction};
use crate::snapshot::FinancialSnapshot;

pub use types::{
    AnomalyDetection, BudgetAlert, CashFlowSummary, ExpenseForecast, InvestmentSuggestion,
    PredictionReport, RiskLevel, Severity, SuggestionType, Trend,
};

/// Runs the heuristics with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct FinancialPredictor {
    config: PredictorConfig,
}

impl FinancialPredictor {
    /// Create a predictor with the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PredictorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// One forecast per expense category with enough monthly history
    pub fn forecast_expenses(
        &self,
        transactions: &[Transaction],
        categories: &[Category],
    ) -> Vec<ExpenseForecast> {
        forecast::forecast_expenses(&self.config.forecast, transactions, categories)
    }

    /// Most unusual expense transactions, highest z-score first
    pub fn detect_anomalies(
        &self,
        transactions: &[Transaction],
        categories: &[Category],
    ) -> Vec<AnomalyDetection> {
        anomaly::detect_anomalies(&self.config.anomaly, transactions, categories)
    }

    /// Alerts for budgets at risk in the month containing `today`
    pub fn budget_alerts(
        &self,
        budgets: &[Budget],
        transactions: &[Transaction],
        categories: &[Category],
        today: NaiveDate,
    ) -> Vec<BudgetAlert> {
        budget::budget_alerts(&self.config.budget, budgets, transactions, categories, today)
    }

    /// Up to three rule-based investment suggestions
    pub fn investment_suggestions(
        &self,
        accounts: &[Account],
        transactions: &[Transaction],
        investments: &[Investment],
        today: NaiveDate,
    ) -> Vec<InvestmentSuggestion> {
        investment::investment_suggestions(
            &self.config.investment,
            accounts,
            transactions,
            investments,
            today,
        )
    }

    /// Income, spending and savings rate for the month containing `today`
    pub fn cash_flow(&self, transactions: &[Transaction], today: NaiveDate) -> CashFlowSummary {
        cash_flow::current_month_cash_flow(transactions, today)
    }

    /// Run every heuristic over a snapshot
    pub fn analyze(&self, snapshot: &FinancialSnapshot, today: NaiveDate) -> PredictionReport {
        let report = PredictionReport {
            generated_for: today,
            cash_flow: self.cash_flow(&snapshot.transactions, today),
            forecasts: self.forecast_expenses(&snapshot.transactions, &snapshot.categories),
            anomalies: self.detect_anomalies(&snapshot.transactions, &snapshot.categories),
            budget_alerts: self.budget_alerts(
                &snapshot.budgets,
                &snapshot.transactions,
                &snapshot.categories,
                today,
            ),
            suggestions: self.investment_suggestions(
                &snapshot.accounts,
                &snapshot.transactions,
                &snapshot.investments,
                today,
            ),
        };

        info!(
            forecasts = report.forecasts.len(),
            anomalies = report.anomalies.len(),
            budget_alerts = report.budget_alerts.len(),
            suggestions = report.suggestions.len(),
            "Analysis complete"
        );

        report
    }
}
