//! Analysis command implementations

use std::path::Path;

use anyhow::Result;
use pennywise_core::{
    AnomalyDetection, BudgetAlert, CashFlowSummary, ExpenseForecast, InvestmentSuggestion,
    PredictionReport, Severity, Trend,
};
use serde::Serialize;

use super::core::{load_predictor, load_snapshot, resolve_today};
use super::truncate;
use crate::cli::{AnalysisArgs, SnapshotArgs};

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", render_json(value)?);
    Ok(())
}

pub fn cmd_forecast(config: Option<&Path>, args: &SnapshotArgs) -> Result<()> {
    let predictor = load_predictor(config)?;
    let snapshot = load_snapshot(&args.input)?;

    let forecasts = predictor.forecast_expenses(&snapshot.transactions, &snapshot.categories);

    if args.json {
        return print_json(&forecasts);
    }
    print_forecasts(&forecasts);
    Ok(())
}

pub fn cmd_anomalies(config: Option<&Path>, args: &SnapshotArgs) -> Result<()> {
    let predictor = load_predictor(config)?;
    let snapshot = load_snapshot(&args.input)?;

    let anomalies = predictor.detect_anomalies(&snapshot.transactions, &snapshot.categories);

    if args.json {
        return print_json(&anomalies);
    }
    print_anomalies(&anomalies);
    Ok(())
}

pub fn cmd_budgets(config: Option<&Path>, args: &AnalysisArgs) -> Result<()> {
    let predictor = load_predictor(config)?;
    let snapshot = load_snapshot(&args.input)?;
    let today = resolve_today(args.today.as_deref())?;

    let alerts = predictor.budget_alerts(
        &snapshot.budgets,
        &snapshot.transactions,
        &snapshot.categories,
        today,
    );

    if args.json {
        return print_json(&alerts);
    }
    print_budget_alerts(&alerts);
    Ok(())
}

pub fn cmd_suggest(config: Option<&Path>, args: &AnalysisArgs) -> Result<()> {
    let predictor = load_predictor(config)?;
    let snapshot = load_snapshot(&args.input)?;
    let today = resolve_today(args.today.as_deref())?;

    let suggestions = predictor.investment_suggestions(
        &snapshot.accounts,
        &snapshot.transactions,
        &snapshot.investments,
        today,
    );

    if args.json {
        return print_json(&suggestions);
    }
    print_suggestions(&suggestions);
    Ok(())
}

/// Load config and snapshot, then run every analysis
pub fn build_report(config: Option<&Path>, args: &AnalysisArgs) -> Result<PredictionReport> {
    let predictor = load_predictor(config)?;
    let snapshot = load_snapshot(&args.input)?;
    let today = resolve_today(args.today.as_deref())?;

    Ok(predictor.analyze(&snapshot, today))
}

pub fn cmd_report(config: Option<&Path>, args: &AnalysisArgs) -> Result<()> {
    let report = build_report(config, args)?;

    if args.json {
        return print_json(&report);
    }

    println!();
    println!("📒 Financial Report for {}", report.generated_for);
    print_cash_flow(&report.cash_flow);
    print_forecasts(&report.forecasts);
    print_anomalies(&report.anomalies);
    print_budget_alerts(&report.budget_alerts);
    print_suggestions(&report.suggestions);
    Ok(())
}

fn print_cash_flow(summary: &CashFlowSummary) {
    println!();
    println!("💵 Cash Flow ({})", summary.month);
    println!("   ─────────────────────────────────────────────");
    println!("   Income:       ${:>12.2}", summary.income);
    println!("   Expenses:     ${:>12.2}", summary.expenses);
    println!("   Net:          ${:>12.2}", summary.net);
    println!("   Savings rate:  {:>12.1}%", summary.savings_rate);
}

fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Increasing => "↑",
        Trend::Decreasing => "↓",
        Trend::Stable => "→",
    }
}

fn print_forecasts(forecasts: &[ExpenseForecast]) {
    println!();
    println!("📈 Expense Forecast");
    println!("   ─────────────────────────────────────────────────────────────");

    if forecasts.is_empty() {
        println!("   Not enough history to forecast (need 2+ months per category).");
        return;
    }

    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>5} │ {:>10}",
        "Category", "This month", "Next month", "Conf", "Trend"
    );
    println!("   ─────────────────────┼────────────┼────────────┼───────┼───────────");

    for f in forecasts {
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>4.0}% │ {} {:>8}",
            truncate(&f.category, 20),
            f.current_month,
            f.predicted_next_month,
            f.confidence * 100.0,
            trend_arrow(f.trend),
            f.trend
        );
    }
}

fn print_anomalies(anomalies: &[AnomalyDetection]) {
    println!();
    println!("🔍 Unusual Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    if anomalies.is_empty() {
        println!("   Nothing unusual found.");
        return;
    }

    for a in anomalies {
        println!(
            "   #{:<6} {}  ${:>10.2}  z={:.2}  {}",
            a.transaction_id,
            a.date,
            a.amount,
            a.anomaly_score,
            truncate(&a.reason, 50)
        );
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Alert => "🔴",
        Severity::Warning => "🟠",
        Severity::Attention => "🟡",
    }
}

/// Most urgent first; within a severity, keep the percentage ordering
pub fn by_urgency(alerts: &[BudgetAlert]) -> Vec<&BudgetAlert> {
    let mut ordered: Vec<&BudgetAlert> = alerts.iter().collect();
    ordered.sort_by_key(|a| std::cmp::Reverse(a.severity().priority()));
    ordered
}

fn print_budget_alerts(alerts: &[BudgetAlert]) {
    println!();
    println!("💰 Budget Alerts");
    println!("   ─────────────────────────────────────────────────────────────");

    if alerts.is_empty() {
        println!("   All budgets on track.");
        return;
    }

    for a in by_urgency(alerts) {
        println!(
            "   {} {:20} ${:>9.2} of ${:>9.2} ({:>5.1}%)  {} days left",
            severity_icon(a.severity()),
            truncate(&a.category_name, 20),
            a.current_spending,
            a.budget_amount,
            a.percentage_used,
            a.days_until_month_end
        );
        if a.predicted_overage > 0.0 {
            println!("      Projected to overspend by ${:.2}", a.predicted_overage);
        }
    }
}

fn print_suggestions(suggestions: &[InvestmentSuggestion]) {
    println!();
    println!("🌱 Investment Suggestions");
    println!("   ─────────────────────────────────────────────────────────────");

    if suggestions.is_empty() {
        println!("   No suggestions right now.");
        return;
    }

    for s in suggestions {
        println!(
            "   [{}] ${:.2} at ~{:.0}%/yr, {} risk",
            s.suggestion_type,
            s.recommended_amount,
            s.expected_return * 100.0,
            s.risk_level
        );
        println!("      {}", s.description);
    }
}
