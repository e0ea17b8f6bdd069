//! Day-level aggregates: live totals, archived records, and view rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::expense::KNOWN_CATEGORIES;

/// Running totals for the open day. `budget == 0.0` means no budget has
/// been configured yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetState {
    pub budget: f64,
    pub spent: f64,
}

impl BudgetState {
    pub fn new(budget: f64, spent: f64) -> Self {
        Self { budget, spent }
    }

    /// May go negative; overspend is a signal, not an error.
    pub fn remaining(&self) -> f64 {
        self.budget - self.spent
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining() < 0.0
    }
}

/// Per-category accumulated spending. Every known category is present with
/// a zero bucket from the start; unknown names get a bucket on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    buckets: BTreeMap<String, f64>,
}

impl CategoryTotals {
    /// A fresh map with every known category zeroed.
    pub fn seeded() -> Self {
        let buckets = KNOWN_CATEGORIES
            .iter()
            .map(|name| (name.to_string(), 0.0))
            .collect();
        Self { buckets }
    }

    pub fn accumulate(&mut self, category: &str, amount: f64) {
        *self.buckets.entry(category.to_string()).or_insert(0.0) += amount;
    }

    /// Zeroes every existing bucket without dropping any key.
    pub fn zero_all(&mut self) {
        for value in self.buckets.values_mut() {
            *value = 0.0;
        }
    }

    pub fn amount_for(&self, category: &str) -> f64 {
        self.buckets.get(category).copied().unwrap_or(0.0)
    }

    /// Sum over all buckets; equals the ledger's `spent` after any mutation.
    pub fn total(&self) -> f64 {
        self.buckets.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.buckets.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Default for CategoryTotals {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Closing totals of an archived day. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub budget: f64,
    pub spent: f64,
}

impl DayRecord {
    pub fn new(date: NaiveDate, budget: f64, spent: f64) -> Self {
        Self {
            date,
            budget,
            spent,
        }
    }
}

/// One row of the monthly history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub budget: f64,
    pub spent: f64,
    pub balance: f64,
    pub is_active: bool,
}

impl DaySummary {
    pub fn new(date: NaiveDate, budget: f64, spent: f64, is_active: bool) -> Self {
        Self {
            date,
            budget,
            spent,
            balance: budget - spent,
            is_active,
        }
    }
}

/// A category's share of the budget, for the per-category chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    pub percent_of_budget: f64,
    pub over_budget: bool,
}
