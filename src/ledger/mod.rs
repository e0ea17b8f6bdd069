//! In-memory state of the currently open accounting day.

use serde::{Deserialize, Serialize};

use crate::domain::{
    BudgetState, CategoryShare, CategoryTotals, Expense, ExpenseId, SyncState, FALLBACK_CATEGORY,
};
use crate::errors::{GastosError, Result};

/// Immutable view of the open day, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub budget_state: BudgetState,
    pub category_totals: CategoryTotals,
    pub expenses: Vec<Expense>,
}

/// Holds the open day's budget, expenses, and derived totals.
///
/// Totals after a removal or edit are recomputed from scratch over the
/// remaining list rather than adjusted by subtraction, so they stay correct
/// under arbitrary deletion order and free of accumulated float drift.
/// Daily expense counts are small, so the O(n) pass is cheap.
#[derive(Debug, Clone)]
pub struct ExpenseLedger {
    budget: Option<f64>,
    spent: f64,
    expenses: Vec<Expense>,
    category_totals: CategoryTotals,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self {
            budget: None,
            spent: 0.0,
            expenses: Vec::new(),
            category_totals: CategoryTotals::seeded(),
        }
    }

    pub fn budget_is_set(&self) -> bool {
        self.budget.is_some()
    }

    pub fn budget(&self) -> f64 {
        self.budget.unwrap_or(0.0)
    }

    pub fn spent(&self) -> f64 {
        self.spent
    }

    pub fn budget_state(&self) -> BudgetState {
        BudgetState::new(self.budget(), self.spent)
    }

    /// Replaces the day's budget, leaving `spent` untouched.
    pub fn set_budget(&mut self, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(GastosError::InvalidAmount(amount.to_string()));
        }
        self.budget = Some(amount);
        Ok(())
    }

    /// Appends an expense and updates the running totals. The entry starts
    /// in [`SyncState::PendingRemote`] and counts toward `spent` immediately.
    pub fn add_expense(
        &mut self,
        category: &str,
        amount: f64,
        note: &str,
    ) -> Result<ExpenseId> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(GastosError::InvalidAmount(amount.to_string()));
        }
        if !self.budget_is_set() {
            return Err(GastosError::BudgetNotSet);
        }
        let category = category.trim();
        let category = if category.is_empty() {
            FALLBACK_CATEGORY
        } else {
            category
        };
        let expense = Expense::new(category, amount, note.trim());
        let id = expense.id.clone();
        self.spent += amount;
        self.category_totals.accumulate(category, amount);
        self.expenses.push(expense);
        Ok(id)
    }

    /// Removes the expense with the given identity and recomputes totals
    /// over the remaining list.
    pub fn remove_expense(&mut self, id: &ExpenseId) -> Result<Expense> {
        let index = self
            .position_of(id)
            .ok_or_else(|| GastosError::ExpenseNotFound(id.to_string()))?;
        let removed = self.expenses.remove(index);
        self.recalculate();
        Ok(removed)
    }

    /// Removes the first expense matching `target`'s identity (remote id,
    /// local id, or structural equality across the two). Covers callers
    /// holding a rehydrated copy rather than the ledger's own id.
    pub fn remove_matching(&mut self, target: &Expense) -> Result<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.same_identity(target))
            .ok_or_else(|| GastosError::ExpenseNotFound(target.id.to_string()))?;
        let removed = self.expenses.remove(index);
        self.recalculate();
        Ok(removed)
    }

    /// Rewrites an expense's amount and note in place. Equivalent to
    /// remove-then-add in totals effect, applied atomically: validation
    /// happens before any mutation, so no intermediate state is observable.
    pub fn replace_expense(&mut self, id: &ExpenseId, amount: f64, note: &str) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(GastosError::InvalidAmount(amount.to_string()));
        }
        let index = self
            .position_of(id)
            .ok_or_else(|| GastosError::ExpenseNotFound(id.to_string()))?;
        let entry = &mut self.expenses[index];
        entry.amount = amount;
        entry.note = note.trim().to_string();
        self.recalculate();
        Ok(())
    }

    /// Marks an optimistically added expense as durably created remotely,
    /// swapping its local id for the remote one.
    pub fn confirm_expense(&mut self, local: &ExpenseId, remote_id: &str) -> Result<()> {
        let index = self
            .position_of(local)
            .ok_or_else(|| GastosError::ExpenseNotFound(local.to_string()))?;
        let entry = &mut self.expenses[index];
        entry.id = ExpenseId::Remote(remote_id.to_string());
        entry.sync = SyncState::Confirmed;
        Ok(())
    }

    /// Flags an optimistically added expense whose remote create failed.
    /// The entry keeps counting toward totals.
    pub fn mark_sync_failed(&mut self, local: &ExpenseId) -> Result<()> {
        let index = self
            .position_of(local)
            .ok_or_else(|| GastosError::ExpenseNotFound(local.to_string()))?;
        self.expenses[index].sync = SyncState::SyncFailed;
        Ok(())
    }

    /// Drops every expense and zeroes the totals; the budget survives.
    pub fn clear_expenses(&mut self) {
        self.expenses.clear();
        self.recalculate();
    }

    /// Recomputes `spent` and every category bucket from the expense list.
    pub fn recalculate(&mut self) {
        self.spent = 0.0;
        self.category_totals.zero_all();
        for expense in &self.expenses {
            self.spent += expense.amount;
            self.category_totals
                .accumulate(&expense.category, expense.amount);
        }
    }

    /// Clears everything, including the budget. The user must set a new
    /// budget before the next expense.
    pub fn reset_for_new_day(&mut self) {
        self.budget = None;
        self.spent = 0.0;
        self.expenses.clear();
        self.category_totals = CategoryTotals::seeded();
    }

    /// Replaces the whole open-day state from remote data.
    pub fn seed(&mut self, budget: Option<f64>, expenses: Vec<Expense>) {
        self.budget = budget.filter(|b| b.is_finite() && *b > 0.0);
        self.expenses = expenses;
        self.recalculate();
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            budget_state: self.budget_state(),
            category_totals: self.category_totals.clone(),
            expenses: self.expenses.clone(),
        }
    }

    /// Per-category shares of the budget for the chart. Zero buckets are
    /// skipped; shares above 100% are flagged. Empty until a budget exists.
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        let budget = match self.budget {
            Some(value) if value > 0.0 => value,
            _ => return Vec::new(),
        };
        self.category_totals
            .iter()
            .filter(|(_, total)| *total > 0.0)
            .map(|(category, total)| {
                let percent = total / budget * 100.0;
                CategoryShare {
                    category: category.to_string(),
                    total,
                    percent_of_budget: percent,
                    over_budget: percent > 100.0,
                }
            })
            .collect()
    }

    fn position_of(&self, id: &ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| &e.id == id)
    }
}

impl Default for ExpenseLedger {
    fn default() -> Self {
        Self::new()
    }
}
