//! Expense Forecaster
//!
//! Extrapolates next month's spending per expense category from the last two
//! months of history. Confidence comes from how consistent the category's
//! monthly totals have been overall.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::ForecastConfig;
use crate::models::{Category, CategoryType, Transaction};

use super::period::{month_key, MonthKey};
use super::stats::{coefficient_of_variation, ratio_or, saturate};
use super::types::{ExpenseForecast, Trend};

/// Forecast next month's spending for every expense category with enough history
///
/// Output follows the order of `categories`.
pub fn forecast_expenses(
    config: &ForecastConfig,
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<ExpenseForecast> {
    let history = monthly_expense_totals(transactions);

    let forecasts: Vec<ExpenseForecast> = categories
        .iter()
        .filter(|c| c.category_type == CategoryType::Expense)
        .filter_map(|category| {
            let series = history.get(&category.id)?;
            if series.len() < config.min_months {
                return None;
            }
            forecast_series(config, &category.name, series)
        })
        .collect();

    debug!(
        categories = categories.len(),
        forecasts = forecasts.len(),
        "Expense forecast complete"
    );

    forecasts
}

/// Build a forecast from a chronological series; a trend needs two months
fn forecast_series(
    config: &ForecastConfig,
    name: &str,
    series: &[f64],
) -> Option<ExpenseForecast> {
    let &[.., previous, current] = series else {
        return None;
    };

    let trend = if current > previous {
        Trend::Increasing
    } else if current < previous {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    let change_rate = if previous > 0.0 {
        ratio_or(current - previous, previous, 0.0)
    } else {
        0.0
    };

    Some(ExpenseForecast {
        category: name.to_string(),
        current_month: current,
        predicted_next_month: saturate(current * (1.0 + change_rate)).max(0.0),
        confidence: consistency_confidence(config, series),
        trend,
    })
}

/// Confidence in [min_confidence, 1] from the series' coefficient of variation
pub fn consistency_confidence(config: &ForecastConfig, series: &[f64]) -> f64 {
    if series.len() < 2 {
        return config.single_point_confidence;
    }
    let cv = coefficient_of_variation(series);
    (1.0 - cv.min(1.0)).clamp(config.min_confidence.min(1.0), 1.0)
}

/// Chronological monthly expense totals keyed by category id
fn monthly_expense_totals(transactions: &[Transaction]) -> HashMap<i64, Vec<f64>> {
    let mut by_category: HashMap<i64, BTreeMap<MonthKey, f64>> = HashMap::new();

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let Some(category_id) = tx.category_id else {
            continue;
        };
        let total = by_category
            .entry(category_id)
            .or_default()
            .entry(month_key(tx.date))
            .or_insert(0.0);
        *total = saturate(*total + tx.magnitude());
    }

    by_category
        .into_iter()
        .map(|(id, months)| (id, months.into_values().collect()))
        .collect()
}
