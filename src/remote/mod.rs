//! Seam to the remote document store that durably holds expenses and the
//! user's budget. Real network backends implement [`RemoteExpenseStore`]
//! outside this crate; [`InMemoryRemoteStore`] serves tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::Expense;
use crate::errors::{GastosError, Result};

/// Remote persistence operations the engine depends on. Implementations run
/// their I/O elsewhere; from the engine's perspective every call completes
/// synchronously with a confirmation or an error.
pub trait RemoteExpenseStore: Send + Sync {
    /// Persists an expense for `owner` and returns its durable id.
    fn create_expense(&self, owner: &str, expense: &Expense) -> Result<String>;
    /// Lists the owner's expenses in creation-time ascending order.
    fn list_expenses(&self, owner: &str) -> Result<Vec<Expense>>;
    fn delete_expense(&self, owner: &str, id: &str) -> Result<()>;
    /// The owner's persisted budget, if any.
    fn fetch_budget(&self, owner: &str) -> Result<Option<f64>>;
}

#[derive(Debug, Default)]
struct RemoteState {
    next_id: u64,
    // (owner, id, expense) in creation order
    documents: Vec<(String, String, Expense)>,
    budgets: HashMap<String, f64>,
    fail_creates: bool,
    fail_deletes: bool,
    fail_reads: bool,
}

/// Reference implementation keeping documents in process memory, with
/// per-operation failure injection for exercising degraded-network paths.
#[derive(Debug, Default)]
pub struct InMemoryRemoteStore {
    state: Mutex<RemoteState>,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_budget(&self, owner: &str, budget: f64) {
        let mut state = self.state.lock().unwrap();
        state.budgets.insert(owner.to_string(), budget);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.state.lock().unwrap().fail_creates = fail;
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.state.lock().unwrap().fail_deletes = fail;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_reads = fail;
    }

    pub fn document_count(&self, owner: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.documents.iter().filter(|(o, _, _)| o == owner).count()
    }
}

impl RemoteExpenseStore for InMemoryRemoteStore {
    fn create_expense(&self, owner: &str, expense: &Expense) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        if state.fail_creates {
            return Err(GastosError::RemoteUnavailable("create rejected".into()));
        }
        state.next_id += 1;
        let id = format!("exp-{:06}", state.next_id);
        state
            .documents
            .push((owner.to_string(), id.clone(), expense.clone()));
        Ok(id)
    }

    fn list_expenses(&self, owner: &str) -> Result<Vec<Expense>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(GastosError::RemoteUnavailable("list rejected".into()));
        }
        Ok(state
            .documents
            .iter()
            .filter(|(o, _, _)| o == owner)
            .map(|(_, id, expense)| {
                Expense::from_remote(id.clone(), expense.category.clone(), expense.amount, expense.note.clone())
            })
            .collect())
    }

    fn delete_expense(&self, owner: &str, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_deletes {
            return Err(GastosError::RemoteUnavailable("delete rejected".into()));
        }
        let before = state.documents.len();
        state.documents.retain(|(o, doc_id, _)| !(o == owner && doc_id == id));
        if state.documents.len() == before {
            return Err(GastosError::ExpenseNotFound(id.to_string()));
        }
        Ok(())
    }

    fn fetch_budget(&self, owner: &str) -> Result<Option<f64>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(GastosError::RemoteUnavailable("budget read rejected".into()));
        }
        Ok(state.budgets.get(owner).copied())
    }
}
