//! Investment Suggestion Generator
//!
//! Three independent rules; each fires on its own trigger:
//! - Emergency fund: liquid assets below N months of income
//! - Diversification: money invested in too few holdings
//! - Surplus: this month's income comfortably exceeds spending

use chrono::NaiveDate;
use tracing::debug;

use crate::config::InvestmentConfig;
use crate::models::{Account, Investment, Transaction};

use super::cash_flow::{average_monthly_income, current_month_cash_flow};
use super::stats::{saturate, saturating_sum};
use super::types::{InvestmentSuggestion, RiskLevel, SuggestionType};

/// Rule-based suggestions for putting money to work
pub fn investment_suggestions(
    config: &InvestmentConfig,
    accounts: &[Account],
    transactions: &[Transaction],
    investments: &[Investment],
    today: NaiveDate,
) -> Vec<InvestmentSuggestion> {
    let mut suggestions = Vec::new();

    let avg_income = average_monthly_income(transactions, today, config.income_lookback_months);

    // 1. Emergency fund
    let liquid_assets = saturating_sum(
        accounts
            .iter()
            .filter(|a| a.account_type.is_liquid())
            .map(|a| a.balance),
    );
    let target = saturate(avg_income * config.emergency_fund_months);

    if liquid_assets < target {
        let gap = saturate(target - liquid_assets);
        suggestions.push(InvestmentSuggestion {
            suggestion_type: SuggestionType::EmergencyFund,
            description: format!(
                "Build an emergency fund covering {} months of income (${:.0}); you are ${:.0} short",
                config.emergency_fund_months, target, gap
            ),
            recommended_amount: gap,
            expected_return: config.emergency_fund_return,
            risk_level: RiskLevel::Low,
        });
    }

    // 2. Diversification
    let total_invested = saturating_sum(investments.iter().map(|i| i.value()));

    if total_invested > 0.0 && investments.len() < config.min_holdings {
        let amount = saturate(total_invested * config.diversification_share);
        suggestions.push(InvestmentSuggestion {
            suggestion_type: SuggestionType::Diversification,
            description: format!(
                "Your portfolio has {} holding(s); consider moving {:.0}% into a new instrument",
                investments.len(),
                config.diversification_share * 100.0
            ),
            recommended_amount: amount,
            expected_return: config.diversification_return,
            risk_level: RiskLevel::Medium,
        });
    }

    // 3. Monthly surplus
    let surplus = current_month_cash_flow(transactions, today).net;

    if surplus > avg_income * config.surplus_income_ratio {
        suggestions.push(InvestmentSuggestion {
            suggestion_type: SuggestionType::NewOpportunity,
            description: format!(
                "You have a ${:.0} surplus this month; consider investing it",
                surplus
            ),
            recommended_amount: surplus,
            expected_return: config.surplus_return,
            risk_level: RiskLevel::Medium,
        });
    }

    debug!(
        liquid_assets,
        avg_income,
        total_invested,
        surplus,
        suggestions = suggestions.len(),
        "Investment rules evaluated"
    );

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, TransactionType};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn account(account_type: AccountType, balance: f64) -> Account {
        Account {
            id: None,
            name: None,
            account_type,
            balance,
        }
    }

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

    fn salary_history() -> Vec<Transaction> {
        vec![
            tx(1, TransactionType::Income, 2000.0, d(2024, 1, 1)),
            tx(2, TransactionType::Income, 2000.0, d(2024, 2, 1)),
            tx(3, TransactionType::Income, 2000.0, d(2024, 3, 1)),
        ]
    }

    fn of_type(
        suggestions: &[InvestmentSuggestion],
        kind: SuggestionType,
    ) -> Option<&InvestmentSuggestion> {
        suggestions.iter().find(|s| s.suggestion_type == kind)
    }

    #[test]
    fn test_emergency_fund_gap() {
        let accounts = vec![
            account(AccountType::Checking, 3000.0),
            account(AccountType::Savings, 2000.0),
            // Credit cards are not liquid
            account(AccountType::CreditCard, 10_000.0),
        ];

        let suggestions = investment_suggestions(
            &InvestmentConfig::default(),
            &accounts,
            &salary_history(),
            &[],
            d(2024, 4, 10),
        );

        let emergency = of_type(&suggestions, SuggestionType::EmergencyFund).unwrap();
        assert!((emergency.recommended_amount - 7000.0).abs() < 1e-9);
        assert_eq!(emergency.expected_return, 0.10);
        assert_eq!(emergency.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_funded_emergency_fund_not_suggested() {
        let accounts = vec![account(AccountType::Savings, 20_000.0)];
        let suggestions = investment_suggestions(
            &InvestmentConfig::default(),
            &accounts,
            &salary_history(),
            &[],
            d(2024, 4, 10),
        );
        assert!(of_type(&suggestions, SuggestionType::EmergencyFund).is_none());
    }

    #[test]
    fn test_diversification() {
        let investments = vec![
            Investment {
                name: Some("Index fund".to_string()),
                current_amount: Some(8000.0),
                initial_amount: Some(5000.0),
            },
            Investment {
                name: None,
                current_amount: None,
                initial_amount: Some(2000.0),
            },
        ];

        let suggestions = investment_suggestions(
            &InvestmentConfig::default(),
            &[],
            &[],
            &investments,
            d(2024, 4, 10),
        );

        let div = of_type(&suggestions, SuggestionType::Diversification).unwrap();
        assert!((div.recommended_amount - 2000.0).abs() < 1e-9);
        assert_eq!(div.expected_return, 0.12);
        assert_eq!(div.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_no_diversification_without_investments() {
        let suggestions =
            investment_suggestions(&InvestmentConfig::default(), &[], &[], &[], d(2024, 4, 10));
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_diversified_portfolio_not_flagged() {
        let investments: Vec<Investment> = (0..3)
            .map(|_| Investment {
                name: None,
                current_amount: Some(1000.0),
                initial_amount: None,
            })
            .collect();

        let suggestions = investment_suggestions(
            &InvestmentConfig::default(),
            &[],
            &[],
            &investments,
            d(2024, 4, 10),
        );
        assert!(of_type(&suggestions, SuggestionType::Diversification).is_none());
    }

    #[test]
    fn test_surplus_opportunity() {
        let mut txs = salary_history();
        txs.push(tx(4, TransactionType::Income, 2000.0, d(2024, 4, 1)));
        txs.push(tx(5, TransactionType::Expense, 1200.0, d(2024, 4, 3)));

        let suggestions = investment_suggestions(
            &InvestmentConfig::default(),
            &[account(AccountType::Savings, 50_000.0)],
            &txs,
            &[],
            d(2024, 4, 10),
        );

        assert_eq!(suggestions.len(), 1);
        let s = &suggestions[0];
        assert_eq!(s.suggestion_type, SuggestionType::NewOpportunity);
        assert!((s.recommended_amount - 800.0).abs() < 1e-9);
        assert_eq!(s.expected_return, 0.15);
    }

    #[test]
    fn test_small_surplus_not_flagged() {
        let mut txs = salary_history();
        txs.push(tx(4, TransactionType::Income, 2000.0, d(2024, 4, 1)));
        // Surplus of 150 is below 10% of the 2000 average
        txs.push(tx(5, TransactionType::Expense, 1850.0, d(2024, 4, 3)));

        let suggestions = investment_suggestions(
            &InvestmentConfig::default(),
            &[account(AccountType::Savings, 50_000.0)],
            &txs,
            &[],
            d(2024, 4, 10),
        );
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_all_rules_fire_at_most_three() {
        let mut txs = salary_history();
        txs.push(tx(4, TransactionType::Income, 3000.0, d(2024, 4, 1)));
        let investments = vec![Investment {
            name: None,
            current_amount: Some(1000.0),
            initial_amount: None,
        }];

        let suggestions = investment_suggestions(
            &InvestmentConfig::default(),
            &[account(AccountType::Checking, 100.0)],
            &txs,
            &investments,
            d(2024, 4, 10),
        );

        assert_eq!(suggestions.len(), 3);
    }

    #[test]
    fn test_extreme_balances_stay_finite() {
        let accounts = vec![
            account(AccountType::Checking, -1e308),
            account(AccountType::Savings, -1e308),
        ];
        let holding = Investment {
            name: None,
            current_amount: Some(1e308),
            initial_amount: None,
        };

        let suggestions = investment_suggestions(
            &InvestmentConfig::default(),
            &accounts,
            &salary_history(),
            &[holding.clone(), holding],
            d(2024, 4, 10),
        );

        let emergency = of_type(&suggestions, SuggestionType::EmergencyFund).unwrap();
        assert_eq!(emergency.recommended_amount, f64::MAX);
        let diversification = of_type(&suggestions, SuggestionType::Diversification).unwrap();
        assert!(diversification.recommended_amount.is_finite());
    }
}
