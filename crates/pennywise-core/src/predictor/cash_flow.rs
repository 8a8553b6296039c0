//! Income and expense totals over calendar months

use chrono::NaiveDate;

use crate::models::Transaction;

use super::period::{month_key, month_label, preceding_months};
use super::stats::{saturate, saturating_sum};
use super::types::CashFlowSummary;

/// Income, expenses and savings rate for the month containing `today`
pub fn current_month_cash_flow(transactions: &[Transaction], today: NaiveDate) -> CashFlowSummary {
    let this_month = month_key(today);
    let mut income = 0.0;
    let mut expenses = 0.0;

    for tx in transactions.iter().filter(|t| month_key(t.date) == this_month) {
        if tx.is_income() {
            income = saturate(income + tx.magnitude());
        } else if tx.is_expense() {
            expenses = saturate(expenses + tx.magnitude());
        }
    }

    let net = saturate(income - expenses);
    let savings_rate = if income > 0.0 {
        saturate(net / income * 100.0)
    } else {
        0.0
    };

    CashFlowSummary {
        month: month_label(today),
        income,
        expenses,
        net,
        savings_rate,
    }
}

/// Average monthly income over the `months` full calendar months before `today`'s month
pub fn average_monthly_income(transactions: &[Transaction], today: NaiveDate, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let window = preceding_months(today, months);

    let total = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_income() && window.contains(&month_key(t.date)))
            .map(|t| t.magnitude()),
    );

    total / f64::from(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn tx(id: i64, kind: TransactionType, amount: f64, date: NaiveDate) -> Transaction {
        Transaction {
            id,
            amount,
            transaction_type: kind,
            category_id: None,
            date,
            category: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_current_month_cash_flow() {
        let txs = vec![
            tx(1, TransactionType::Income, 4000.0, d(2024, 3, 1)),
            tx(2, TransactionType::Expense, 1000.0, d(2024, 3, 5)),
            tx(3, TransactionType::Transfer, 700.0, d(2024, 3, 6)),
            tx(4, TransactionType::Expense, 300.0, d(2024, 2, 27)),
        ];

        let summary = current_month_cash_flow(&txs, d(2024, 3, 15));
        assert_eq!(summary.month, "2024-03");
        assert_eq!(summary.income, 4000.0);
        assert_eq!(summary.expenses, 1000.0);
        assert_eq!(summary.net, 3000.0);
        assert_eq!(summary.savings_rate, 75.0);
    }

    #[test]
    fn test_savings_rate_without_income() {
        let txs = vec![tx(1, TransactionType::Expense, 50.0, d(2024, 3, 5))];
        let summary = current_month_cash_flow(&txs, d(2024, 3, 15));
        assert_eq!(summary.savings_rate, 0.0);
        assert_eq!(summary.net, -50.0);
    }

    #[test]
    fn test_average_income_uses_full_preceding_months() {
        let txs = vec![
            tx(1, TransactionType::Income, 2000.0, d(2023, 12, 1)),
            tx(2, TransactionType::Income, 2000.0, d(2024, 1, 1)),
            tx(3, TransactionType::Income, 2000.0, d(2024, 2, 1)),
            // Current month and older months are outside the window
            tx(4, TransactionType::Income, 9000.0, d(2024, 3, 1)),
            tx(5, TransactionType::Income, 9000.0, d(2023, 11, 30)),
        ];

        assert_eq!(average_monthly_income(&txs, d(2024, 3, 15), 3), 2000.0);
        assert_eq!(average_monthly_income(&txs, d(2024, 3, 15), 0), 0.0);
    }

    #[test]
    fn test_cash_flow_saturates_on_overflow() {
        let txs = vec![
            tx(1, TransactionType::Expense, 1e308, d(2024, 3, 5)),
            tx(2, TransactionType::Expense, 1e308, d(2024, 3, 6)),
            tx(3, TransactionType::Income, 1e-300, d(2024, 3, 1)),
        ];

        let summary = current_month_cash_flow(&txs, d(2024, 3, 20));
        assert_eq!(summary.expenses, f64::MAX);
        assert!(summary.net.is_finite());
        assert_eq!(summary.savings_rate, f64::MIN);
    }
}
