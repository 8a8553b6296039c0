//! Anomaly Detector
//!
//! Flags expense transactions that sit far above their category's norm: the
//! z-score must exceed the threshold AND the amount must be well above the
//! category mean, so unusually small purchases are never reported.
//!
//! Results are ranked by z-score (most severe first) before truncation.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::AnomalyConfig;
use crate::models::{Category, Transaction};

use super::stats::{mean, std_dev};
use super::types::AnomalyDetection;

const UNCATEGORIZED: &str = "Uncategorized";

/// Find the most unusual expense transactions across all categories
pub fn detect_anomalies(
    config: &AnomalyConfig,
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<AnomalyDetection> {
    let names: HashMap<i64, &str> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    // Ascending category id keeps discovery order deterministic
    let mut by_category: BTreeMap<Option<i64>, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        by_category.entry(tx.category_id).or_default().push(tx);
    }

    let mut anomalies = Vec::new();

    for (category_id, txs) in &by_category {
        let amounts: Vec<f64> = txs.iter().map(|t| t.magnitude()).collect();
        let avg = mean(&amounts);
        let sd = std_dev(&amounts);

        // Identical amounts have no outliers
        if !sd.is_finite() || sd <= f64::EPSILON {
            continue;
        }

        for (tx, &amount) in txs.iter().zip(&amounts) {
            let z = (amount - avg).abs() / sd;
            if z <= config.z_threshold || amount <= avg * config.mean_multiplier {
                continue;
            }

            let name = category_name(tx, *category_id, &names);
            anomalies.push(AnomalyDetection {
                transaction_id: tx.id,
                amount,
                category: name.to_string(),
                date: tx.date,
                anomaly_score: z,
                reason: format!(
                    "{}% above average for {}",
                    (z * config.reason_scale).round() as i64,
                    name
                ),
            });
        }
    }

    let flagged = anomalies.len();

    // Stable sort: equal scores keep discovery order
    anomalies.sort_by(|a, b| b.anomaly_score.total_cmp(&a.anomaly_score));
    anomalies.truncate(config.max_results);

    debug!(
        categories = by_category.len(),
        flagged,
        returned = anomalies.len(),
        "Anomaly scan complete"
    );

    anomalies
}

fn category_name<'a>(
    tx: &'a Transaction,
    category_id: Option<i64>,
    names: &HashMap<i64, &'a str>,
) -> &'a str {
    if let Some(ref category) = tx.category {
        return &category.name;
    }
    category_id
        .and_then(|id| names.get(&id).copied())
        .unwrap_or(UNCATEGORIZED)
}
