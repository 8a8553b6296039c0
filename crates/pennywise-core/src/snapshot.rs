//! Snapshot of a household's financial data
//!
//! The CLI (and any other caller without live data) hands the predictor one
//! JSON document holding every collection it needs. Missing collections are
//! treated as empty.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Account, Budget, Category, Investment, Transaction};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSnapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub accounts: Vec<Account>,
    pub investments: Vec<Investment>,
}

impl FinancialSnapshot {
    /// Parse a snapshot from any JSON reader
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        snapshot.check_ids()?;
        Ok(snapshot)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let snapshot = Self::from_json(BufReader::new(file))?;
        tracing::debug!(
            path = %path.as_ref().display(),
            transactions = snapshot.transactions.len(),
            categories = snapshot.categories.len(),
            budgets = snapshot.budgets.len(),
            accounts = snapshot.accounts.len(),
            investments = snapshot.investments.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Category ids must be unique so names resolve unambiguously
    fn check_ids(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id) {
                return Err(Error::InvalidData(format!(
                    "Duplicate category id: {}",
                    category.id
                )));
            }
        }
        Ok(())
    }
}
