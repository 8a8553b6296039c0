//! Budget Alert Generator
//!
//! Projects each active budget's month-end spending from the daily rate so
//! far this month, and raises an alert when the budget is mostly used or on
//! track to overspend.

use chrono::Datelike;
use chrono::NaiveDate;
use tracing::debug;

use crate::config::BudgetConfig;
use crate::models::{Budget, Category, Transaction};

use super::period::{days_in_month, month_key};
use super::stats::{saturate, saturating_sum};
use super::types::BudgetAlert;

/// Alerts for budgets at risk this month, most consumed first
pub fn budget_alerts(
    config: &BudgetConfig,
    budgets: &[Budget],
    transactions: &[Transaction],
    categories: &[Category],
    today: NaiveDate,
) -> Vec<BudgetAlert> {
    let this_month = month_key(today);
    let days_elapsed = today.day();
    let total_days = days_in_month(today);

    let mut alerts: Vec<BudgetAlert> = budgets
        .iter()
        .filter(|b| b.is_active)
        .filter_map(|budget| {
            let current_spending = saturating_sum(
                transactions
                    .iter()
                    .filter(|t| {
                        t.is_expense()
                            && t.category_id == Some(budget.category_id)
                            && month_key(t.date) == this_month
                    })
                    .map(|t| t.magnitude()),
            );

            let percentage_used = percentage_of(current_spending, budget.amount);

            // days_elapsed is the day of month, never zero
            let daily_rate = current_spending / f64::from(days_elapsed);
            let predicted_spending = saturate(daily_rate * f64::from(total_days));
            let predicted_overage = saturate(predicted_spending - budget.amount).max(0.0);

            if percentage_used <= config.alert_threshold_percent && predicted_overage <= 0.0 {
                return None;
            }

            let category_name = categories
                .iter()
                .find(|c| c.id == budget.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| fallback_name(budget));

            Some(BudgetAlert {
                category_id: budget.category_id,
                category_name,
                budget_amount: budget.amount,
                current_spending,
                percentage_used,
                days_until_month_end: total_days - days_elapsed,
                predicted_overage,
            })
        })
        .collect();

    alerts.sort_by(|a, b| b.percentage_used.total_cmp(&a.percentage_used));

    debug!(
        budgets = budgets.len(),
        alerts = alerts.len(),
        "Budget projection complete"
    );

    alerts
}

/// Budget's own name, or its category id when it has none
fn fallback_name(budget: &Budget) -> String {
    let name = budget.name.trim();
    if name.is_empty() {
        format!("Category {}", budget.category_id)
    } else {
        name.to_string()
    }
}

/// Share of the budget spent, as a percentage
///
/// An empty or negative budget reads as fully used once anything is spent.
fn percentage_of(spent: f64, budget: f64) -> f64 {
    if budget <= 0.0 {
        return if spent > 0.0 { 100.0 } else { 0.0 };
    }
    saturate(spent / budget * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, TransactionType};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn expense(id: i64, category_id: i64, amount: f64, date: NaiveDate) -> Transaction {
        Transaction {
            id,
            amount,
            transaction_type: TransactionType::Expense,
            category_id: Some(category_id),
            date,
            category: None,
        }
    }

    fn budget(category_id: i64, amount: f64) -> Budget {
        Budget {
            category_id,
            amount,
            name: format!("Budget {}", category_id),
            is_active: true,
        }
    }

    #[test]
    fn test_projected_overage() {
        // June has 30 days
        let today = d(2024, 6, 20);
        let txs = vec![
            expense(1, 1, 400.0, d(2024, 6, 2)),
            expense(2, 1, 500.0, d(2024, 6, 18)),
            // Last month does not count
            expense(3, 1, 999.0, d(2024, 5, 30)),
        ];
        let cats = vec![Category {
            id: 1,
            name: "Groceries".to_string(),
            category_type: CategoryType::Expense,
        }];

        let alerts = budget_alerts(
            &BudgetConfig::default(),
            &[budget(1, 1000.0)],
            &txs,
            &cats,
            today,
        );

        assert_eq!(alerts.len(), 1);
        let a = &alerts[0];
        assert_eq!(a.category_name, "Groceries");
        assert_eq!(a.current_spending, 900.0);
        assert!((a.percentage_used - 90.0).abs() < 1e-9);
        assert!((a.predicted_overage - 350.0).abs() < 1e-9);
        assert_eq!(a.days_until_month_end, 10);
    }

    #[test]
    fn test_on_track_budget_not_alerted() {
        let today = d(2024, 6, 15);
        let txs = vec![expense(1, 1, 300.0, d(2024, 6, 10))];

        let alerts = budget_alerts(&BudgetConfig::default(), &[budget(1, 1000.0)], &txs, &[], today);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_first_day_of_month_uses_full_spend_as_rate() {
        let today = d(2024, 6, 1);
        let txs = vec![expense(1, 1, 50.0, today)];

        let alerts = budget_alerts(&BudgetConfig::default(), &[budget(1, 1000.0)], &txs, &[], today);

        assert_eq!(alerts.len(), 1);
        assert!((alerts[0].predicted_overage - 500.0).abs() < 1e-9);
        assert_eq!(alerts[0].days_until_month_end, 29);
        assert_eq!(alerts[0].category_name, "Budget 1");
    }

    #[test]
    fn test_sorted_by_percentage_desc() {
        let today = d(2024, 6, 28);
        let txs = vec![
            expense(1, 1, 85.0, d(2024, 6, 3)),
            expense(2, 2, 150.0, d(2024, 6, 3)),
            expense(3, 3, 95.0, d(2024, 6, 3)),
        ];
        let budgets = vec![budget(1, 100.0), budget(2, 100.0), budget(3, 100.0)];

        let alerts = budget_alerts(&BudgetConfig::default(), &budgets, &txs, &[], today);

        let ids: Vec<i64> = alerts.iter().map(|a| a.category_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        for pair in alerts.windows(2) {
            assert!(pair[0].percentage_used >= pair[1].percentage_used);
        }
        assert!(alerts.iter().all(|a| a.predicted_overage >= 0.0));
    }

    #[test]
    fn test_zero_budget_and_inactive_budget() {
        let today = d(2024, 6, 10);
        let txs = vec![
            expense(1, 1, 20.0, d(2024, 6, 3)),
            expense(2, 2, 500.0, d(2024, 6, 3)),
        ];
        let mut inactive = budget(2, 100.0);
        inactive.is_active = false;

        let alerts = budget_alerts(
            &BudgetConfig::default(),
            &[budget(1, 0.0), inactive],
            &txs,
            &[],
            today,
        );

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category_id, 1);
        assert_eq!(alerts[0].percentage_used, 100.0);
        assert!(alerts[0].percentage_used.is_finite());
    }

    #[test]
    fn test_zero_budget_without_spending_is_quiet() {
        let alerts = budget_alerts(
            &BudgetConfig::default(),
            &[budget(1, 0.0)],
            &[],
            &[],
            d(2024, 6, 10),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_overflowing_spend_stays_finite() {
        let today = d(2024, 6, 20);
        let txs = vec![
            expense(1, 1, 1e308, d(2024, 6, 2)),
            expense(2, 1, 1e308, d(2024, 6, 3)),
        ];

        let alerts = budget_alerts(&BudgetConfig::default(), &[budget(1, 100.0)], &txs, &[], today);

        assert_eq!(alerts.len(), 1);
        let a = &alerts[0];
        assert!(a.current_spending.is_finite());
        assert!(a.percentage_used.is_finite());
        assert!(a.predicted_overage.is_finite());

        let json = serde_json::to_value(a).unwrap();
        assert!(json["percentageUsed"].is_number());
        assert!(json["predictedOverage"].is_number());
    }

    #[test]
    fn test_tiny_budget_percentage_is_finite() {
        let today = d(2024, 6, 20);
        let txs = vec![expense(1, 1, 1e300, d(2024, 6, 2))];

        let alerts = budget_alerts(&BudgetConfig::default(), &[budget(1, 1e-300)], &txs, &[], today);
        assert_eq!(alerts[0].percentage_used, f64::MAX);
    }

    #[test]
    fn test_unnamed_budget_falls_back_to_category_id() {
        let today = d(2024, 6, 20);
        let txs = vec![expense(1, 7, 95.0, d(2024, 6, 2))];
        let mut unnamed = budget(7, 100.0);
        unnamed.name = String::new();

        let alerts = budget_alerts(&BudgetConfig::default(), &[unnamed], &txs, &[], today);
        assert_eq!(alerts[0].category_name, "Category 7");
    }
}
