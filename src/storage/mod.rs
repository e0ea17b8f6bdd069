//! Local persistence: a prefs-style key-value store and the day archive
//! built on top of it.

pub mod archive;
pub mod prefs;

use crate::errors::Result;

/// Key holding the calendar day the ledger currently represents.
pub const KEY_LAST_DAY: &str = "last_day";
/// Keys mirroring the open day's live totals.
pub const KEY_CURRENT_BUDGET: &str = "current_budget";
pub const KEY_CURRENT_SPENT: &str = "current_spent";
/// Per-date keys for archived closing totals.
pub const DAY_TOTAL_PREFIX: &str = "day_total_";
pub const DAY_BUDGET_PREFIX: &str = "day_budget_";

/// Abstraction over a restart-surviving key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get_string(&self, key: &str) -> Option<String>;
    fn put_string(&mut self, key: &str, value: &str) -> Result<()>;
    /// Returns 0.0 for missing or non-numeric keys.
    fn get_float(&self, key: &str) -> f64;
    fn put_float(&mut self, key: &str, value: f64) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn keys(&self) -> Vec<String>;
}

pub use archive::DayArchive;
pub use prefs::{JsonPrefs, MemoryPrefs};
