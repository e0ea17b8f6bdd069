use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for ledger, rollover, and persistence layers.
#[derive(Debug, Error)]
pub enum GastosError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Budget not set for the open day")]
    BudgetNotSet,
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = StdResult<T, GastosError>;

impl From<std::io::Error> for GastosError {
    fn from(err: std::io::Error) -> Self {
        GastosError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for GastosError {
    fn from(err: serde_json::Error) -> Self {
        GastosError::Persistence(err.to_string())
    }
}
