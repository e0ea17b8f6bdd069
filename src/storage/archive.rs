//! Append-only archive of closed-day totals, keyed by calendar date.

use chrono::NaiveDate;

use crate::domain::{BudgetState, DayRecord};
use crate::errors::Result;
use crate::storage::{
    KeyValueStore, DAY_BUDGET_PREFIX, DAY_TOTAL_PREFIX, KEY_CURRENT_BUDGET, KEY_CURRENT_SPENT,
    KEY_LAST_DAY,
};

/// Durable record of closed days plus a continuously updated mirror of the
/// open day's live totals. Writes for a given date are idempotent by key;
/// the last write wins.
pub struct DayArchive {
    store: Box<dyn KeyValueStore>,
}

impl DayArchive {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The day the ledger currently represents, if one was ever recorded.
    pub fn last_day(&self) -> Option<NaiveDate> {
        let raw = self.store.get_string(KEY_LAST_DAY)?;
        match raw.parse() {
            Ok(date) => Some(date),
            Err(_) => {
                tracing::warn!(value = %raw, "ignoring unparsable last_day pointer");
                None
            }
        }
    }

    pub fn set_last_day(&mut self, date: NaiveDate) -> Result<()> {
        self.store.put_string(KEY_LAST_DAY, &date.to_string())
    }

    /// Writes a closed day's totals under its date key.
    pub fn archive_day(&mut self, record: &DayRecord) -> Result<()> {
        let date = record.date.to_string();
        self.store
            .put_float(&format!("{DAY_TOTAL_PREFIX}{date}"), record.spent)?;
        self.store
            .put_float(&format!("{DAY_BUDGET_PREFIX}{date}"), record.budget)?;
        tracing::info!(%date, budget = record.budget, spent = record.spent, "archived closed day");
        Ok(())
    }

    /// One record per distinct archived date, excluding the open day.
    /// Keys that do not parse as dates are skipped.
    pub fn list_closed_days(&self, open_day: NaiveDate) -> Vec<DayRecord> {
        self.store
            .keys()
            .into_iter()
            .filter_map(|key| {
                let raw = key.strip_prefix(DAY_TOTAL_PREFIX)?;
                let date: NaiveDate = raw.parse().ok()?;
                if date == open_day {
                    return None;
                }
                let spent = self.store.get_float(&key);
                let budget = self.store.get_float(&format!("{DAY_BUDGET_PREFIX}{raw}"));
                Some(DayRecord::new(date, budget, spent))
            })
            .collect()
    }

    /// Updates the live-totals mirror for the still-open day.
    pub fn mirror_open_day(&mut self, budget: f64, spent: f64) -> Result<()> {
        self.store.put_float(KEY_CURRENT_BUDGET, budget)?;
        self.store.put_float(KEY_CURRENT_SPENT, spent)?;
        Ok(())
    }

    /// Best-known totals for the open day, from the most recent mirror write.
    pub fn read_open_day_snapshot(&self) -> BudgetState {
        BudgetState::new(
            self.store.get_float(KEY_CURRENT_BUDGET),
            self.store.get_float(KEY_CURRENT_SPENT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPrefs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn archive() -> DayArchive {
        DayArchive::new(Box::new(MemoryPrefs::new()))
    }

    #[test]
    fn last_day_round_trips_through_the_store() {
        let mut archive = archive();
        assert_eq!(archive.last_day(), None);
        archive.set_last_day(date(2025, 1, 2)).unwrap();
        assert_eq!(archive.last_day(), Some(date(2025, 1, 2)));
    }

    #[test]
    fn rearchiving_a_date_overwrites_it() {
        let mut archive = archive();
        archive
            .archive_day(&DayRecord::new(date(2025, 1, 1), 1000.0, 400.0))
            .unwrap();
        archive
            .archive_day(&DayRecord::new(date(2025, 1, 1), 1000.0, 550.0))
            .unwrap();

        let closed = archive.list_closed_days(date(2025, 1, 2));
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].spent, 550.0);
    }

    #[test]
    fn closed_days_exclude_the_open_day() {
        let mut archive = archive();
        archive
            .archive_day(&DayRecord::new(date(2025, 1, 1), 500.0, 100.0))
            .unwrap();
        archive
            .archive_day(&DayRecord::new(date(2025, 1, 2), 600.0, 200.0))
            .unwrap();

        let closed = archive.list_closed_days(date(2025, 1, 2));
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].date, date(2025, 1, 1));
    }

    #[test]
    fn mirror_feeds_the_open_day_snapshot() {
        let mut archive = archive();
        assert_eq!(archive.read_open_day_snapshot(), BudgetState::default());
        archive.mirror_open_day(500.0, 50.0).unwrap();
        let open = archive.read_open_day_snapshot();
        assert_eq!(open.budget, 500.0);
        assert_eq!(open.spent, 50.0);
    }
}
