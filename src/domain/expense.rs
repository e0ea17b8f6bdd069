//! Expense records and the category vocabulary they are filed under.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GastosError, Result};

/// The fixed category set offered to the user. Submissions outside this set
/// are accepted and aggregated under their literal name.
pub const KNOWN_CATEGORIES: [&str; 7] = [
    "Comida",
    "Transporte",
    "Hogar",
    "Ocio",
    "Salud",
    "Educación",
    "Otros",
];

/// Bucket shown for any category name not in [`KNOWN_CATEGORIES`].
pub const FALLBACK_CATEGORY: &str = "Otros";

static CANONICAL_LOOKUP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for name in KNOWN_CATEGORIES {
        map.insert(name.to_lowercase(), name);
    }
    // Accept the unaccented spelling users tend to type.
    map.insert("educacion".to_string(), "Educación");
    map
});

/// Maps an arbitrary submitted category name to its display bucket.
/// Unrecognized names fall back to [`FALLBACK_CATEGORY`]; aggregation keys
/// stay on the literal submitted name.
pub fn display_category(raw: &str) -> &'static str {
    CANONICAL_LOOKUP
        .get(&raw.trim().to_lowercase())
        .copied()
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Parses a user-entered amount, accepting either decimal separator.
/// Non-positive or unparsable input is rejected as [`GastosError::InvalidAmount`].
pub fn parse_amount(raw: &str) -> Result<f64> {
    let normalized = raw.replace(',', ".");
    let value: f64 = normalized
        .trim()
        .parse()
        .map_err(|_| GastosError::InvalidAmount(raw.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(GastosError::InvalidAmount(raw.to_string()));
    }
    Ok(value)
}

/// Identity of an expense across its remote-confirmation lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseId {
    /// Assigned at submission time, before the remote store has confirmed.
    Local(Uuid),
    /// Durable id handed back by the remote store.
    Remote(String),
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseId::Local(id) => write!(f, "local:{id}"),
            ExpenseId::Remote(id) => f.write_str(id),
        }
    }
}

/// Remote synchronization state of an optimistically added expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    PendingRemote,
    Confirmed,
    SyncFailed,
}

/// A single spending entry within the open day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub category: String,
    pub amount: f64,
    pub note: String,
    pub sync: SyncState,
}

impl Expense {
    /// Creates a locally identified expense awaiting remote confirmation.
    pub fn new(category: impl Into<String>, amount: f64, note: impl Into<String>) -> Self {
        Self {
            id: ExpenseId::Local(Uuid::new_v4()),
            category: category.into(),
            amount,
            note: note.into(),
            sync: SyncState::PendingRemote,
        }
    }

    /// Rehydrates an expense that already exists in the remote store.
    pub fn from_remote(
        id: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::Remote(id.into()),
            category: category.into(),
            amount,
            note: note.into(),
            sync: SyncState::Confirmed,
        }
    }

    /// Identity used for removal and replacement: matching ids when both
    /// sides carry the same kind, structural equality otherwise.
    pub fn same_identity(&self, other: &Expense) -> bool {
        match (&self.id, &other.id) {
            (ExpenseId::Remote(a), ExpenseId::Remote(b)) => a == b,
            (ExpenseId::Local(a), ExpenseId::Local(b)) => a == b,
            _ => {
                self.category == other.category
                    && self.amount == other.amount
                    && self.note == other.note
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_comma_separator() {
        assert_eq!(parse_amount("12,50").unwrap(), 12.5);
        assert_eq!(parse_amount(" 3.25 ").unwrap(), 3.25);
    }

    #[test]
    fn parse_amount_rejects_junk_and_non_positive() {
        for raw in ["", "abc", "0", "-5", "0,0"] {
            match parse_amount(raw) {
                Err(GastosError::InvalidAmount(_)) => {}
                other => panic!("expected InvalidAmount for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn display_category_maps_unknown_names_to_fallback() {
        assert_eq!(display_category("Comida"), "Comida");
        assert_eq!(display_category("  educacion "), "Educación");
        assert_eq!(display_category("Criptomonedas"), FALLBACK_CATEGORY);
    }

    #[test]
    fn identity_prefers_ids_and_falls_back_to_structure() {
        let a = Expense::from_remote("doc-1", "Comida", 10.0, "");
        let b = Expense::from_remote("doc-1", "Comida", 99.0, "edited");
        assert!(a.same_identity(&b));

        let local = Expense::new("Ocio", 20.0, "cine");
        let remote_twin = Expense::from_remote("doc-2", "Ocio", 20.0, "cine");
        assert!(local.same_identity(&remote_twin));
        assert!(!local.same_identity(&a));
    }
}
