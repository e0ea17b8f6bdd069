//! Domain types for the daily expense engine.

pub mod day;
pub mod expense;

pub use day::{BudgetState, CategoryShare, CategoryTotals, DayRecord, DaySummary};
pub use expense::{
    display_category, parse_amount, Expense, ExpenseId, SyncState, FALLBACK_CATEGORY,
    KNOWN_CATEGORIES,
};
