//! Result types produced by the predictor

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of month-over-month spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increasing" => Ok(Trend::Increasing),
            "decreasing" => Ok(Trend::Decreasing),
            "stable" => Ok(Trend::Stable),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

/// Forecast of next month's spending for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForecast {
    pub category: String,
    pub current_month: f64,
    pub predicted_next_month: f64,
    /// Consistency of the monthly series, in [min_confidence, 1]
    pub confidence: f64,
    pub trend: Trend,
}

/// An expense transaction that stands out from its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDetection {
    pub transaction_id: i64,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    /// z-score of the amount within its category
    pub anomaly_score: f64,
    pub reason: String,
}

/// A budget that is nearly used up or on track to overspend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category_id: i64,
    pub category_name: String,
    pub budget_amount: f64,
    pub current_spending: f64,
    pub percentage_used: f64,
    pub days_until_month_end: u32,
    pub predicted_overage: f64,
}

impl BudgetAlert {
    /// How urgent the alert is, for display ordering and coloring
    ///
    /// Spent or projected to spend the whole budget is an alert.
    pub fn severity(&self) -> Severity {
        if self.percentage_used >= 100.0 || self.predicted_overage > 0.0 {
            Severity::Alert
        } else if self.percentage_used > 90.0 {
            Severity::Warning
        } else {
            Severity::Attention
        }
    }
}

/// Severity level of a budget alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
    /// Budget exhausted or projected to be
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Attention => "attention",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Attention => 1,
            Severity::Warning => 2,
            Severity::Alert => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attention" => Ok(Severity::Attention),
            "warning" => Ok(Severity::Warning),
            "alert" => Ok(Severity::Alert),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Kinds of investment suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    EmergencyFund,
    Diversification,
    Rebalancing,
    NewOpportunity,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::EmergencyFund => "emergency_fund",
            SuggestionType::Diversification => "diversification",
            SuggestionType::Rebalancing => "rebalancing",
            SuggestionType::NewOpportunity => "new_opportunity",
        }
    }
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SuggestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emergency_fund" => Ok(SuggestionType::EmergencyFund),
            "diversification" => Ok(SuggestionType::Diversification),
            "rebalancing" => Ok(SuggestionType::Rebalancing),
            "new_opportunity" => Ok(SuggestionType::NewOpportunity),
            _ => Err(format!("Unknown suggestion type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

/// A rule-based investment suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSuggestion {
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub description: String,
    pub recommended_amount: f64,
    /// Expected annual return as a fraction (0.10 = 10%)
    pub expected_return: f64,
    pub risk_level: RiskLevel,
}

/// Income and spending for the current month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSummary {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    /// Net as a percentage of income; 0 when there was no income
    pub savings_rate: f64,
}

/// Everything the predictor produces for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionReport {
    pub generated_for: NaiveDate,
    pub cash_flow: CashFlowSummary,
    pub forecasts: Vec<ExpenseForecast>,
    pub anomalies: Vec<AnomalyDetection>,
    pub budget_alerts: Vec<BudgetAlert>,
    pub suggestions: Vec<InvestmentSuggestion>,
}
