//! Intent-driven facade tying the ledger, archive, rollover, and remote
//! store together. The presentation layer issues [`Intent`]s and re-renders
//! from the returned [`LedgerSnapshot`]; it never mutates engine state
//! directly.

use crate::core::rollover::{DayRolloverManager, Rollover};
use crate::core::summary::MonthlySummaryBuilder;
use crate::core::time::Clock;
use crate::domain::{DaySummary, ExpenseId};
use crate::errors::{GastosError, Result};
use crate::ledger::{ExpenseLedger, LedgerSnapshot};
use crate::remote::RemoteExpenseStore;
use crate::storage::DayArchive;

/// A user action against the open day.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetBudget { amount: f64 },
    AddExpense { category: String, amount: f64, note: String },
    DeleteExpense { id: ExpenseId },
    EditExpense { id: ExpenseId, amount: f64, note: String },
    ClearExpenses,
    RecalculateTotals,
}

/// Single active ledger per process; all operations run synchronously on
/// the caller's thread.
///
/// Consistency is deliberately asymmetric: adds mutate local state before
/// the remote create is confirmed (the entry shows immediately and is
/// reconciled or flagged afterwards), while deletes only mutate local state
/// after the remote removal succeeded, so the visible list never claims
/// something is gone that the durable store still holds.
pub struct DayBook {
    ledger: ExpenseLedger,
    archive: DayArchive,
    remote: Box<dyn RemoteExpenseStore>,
    clock: Box<dyn Clock>,
    owner: String,
}

impl DayBook {
    pub fn new(
        archive: DayArchive,
        remote: Box<dyn RemoteExpenseStore>,
        clock: Box<dyn Clock>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            ledger: ExpenseLedger::new(),
            archive,
            remote,
            clock,
            owner: owner.into(),
        }
    }

    /// Runs the rollover check against the clock's current day. Call once
    /// per app activation (start or foreground); there is no timer.
    pub fn on_activate(&mut self) -> Rollover {
        DayRolloverManager::check_and_roll(&mut self.ledger, &mut self.archive, self.clock.today())
    }

    /// Applies a user intent and returns the resulting view state.
    ///
    /// For `AddExpense`, a failed remote create still leaves the optimistic
    /// entry in place (flagged `SyncFailed`); the returned error reports the
    /// failure and the caller re-renders from [`DayBook::snapshot`].
    pub fn dispatch(&mut self, intent: Intent) -> Result<LedgerSnapshot> {
        match intent {
            Intent::SetBudget { amount } => {
                self.ledger.set_budget(amount)?;
            }
            Intent::AddExpense {
                category,
                amount,
                note,
            } => {
                self.add_expense(&category, amount, &note)?;
            }
            Intent::DeleteExpense { id } => {
                self.delete_expense(&id)?;
            }
            Intent::EditExpense { id, amount, note } => {
                self.ledger.replace_expense(&id, amount, &note)?;
            }
            Intent::ClearExpenses => {
                self.ledger.clear_expenses();
            }
            Intent::RecalculateTotals => {
                self.ledger.recalculate();
            }
        }
        self.mirror_totals();
        Ok(self.ledger.snapshot())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn monthly_summary(&self) -> Vec<DaySummary> {
        MonthlySummaryBuilder::build(&self.archive, self.clock.today())
    }

    /// Seeds the open day from the remote store: the owner's persisted
    /// budget plus their expenses in creation order. A remote failure
    /// surfaces before any local mutation, leaving current state untouched.
    pub fn load_remote_day(&mut self) -> Result<LedgerSnapshot> {
        let budget = self.remote.fetch_budget(&self.owner)?;
        let expenses = self.remote.list_expenses(&self.owner)?;
        self.ledger.seed(budget, expenses);
        self.mirror_totals();
        Ok(self.ledger.snapshot())
    }

    fn add_expense(&mut self, category: &str, amount: f64, note: &str) -> Result<()> {
        let local_id = self.ledger.add_expense(category, amount, note)?;
        self.mirror_totals();

        let pending = self
            .ledger
            .snapshot()
            .expenses
            .into_iter()
            .find(|e| e.id == local_id)
            .ok_or_else(|| GastosError::ExpenseNotFound(local_id.to_string()))?;

        match self.remote.create_expense(&self.owner, &pending) {
            Ok(remote_id) => self.ledger.confirm_expense(&local_id, &remote_id),
            Err(err) => {
                tracing::warn!(%err, "remote create failed; keeping optimistic entry");
                self.ledger.mark_sync_failed(&local_id)?;
                Err(err)
            }
        }
    }

    fn delete_expense(&mut self, id: &ExpenseId) -> Result<()> {
        // Confirmed expenses exist remotely; those must be durably removed
        // before the local list changes. Unconfirmed ones are local-only.
        if let ExpenseId::Remote(remote_id) = id {
            self.remote.delete_expense(&self.owner, remote_id)?;
        }
        self.ledger.remove_expense(id)?;
        Ok(())
    }

    /// Releases the underlying archive, e.g. to rebuild the book against a
    /// different clock or remote backend.
    pub fn into_archive(self) -> DayArchive {
        self.archive
    }

    fn mirror_totals(&mut self) {
        let state = self.ledger.budget_state();
        if let Err(err) = self.archive.mirror_open_day(state.budget, state.spent) {
            tracing::warn!(%err, "failed to mirror open-day totals");
        }
    }
}
