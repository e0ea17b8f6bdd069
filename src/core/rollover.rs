//! Day-boundary detection and the ledger reset that follows it.

use chrono::NaiveDate;

use crate::domain::DayRecord;
use crate::ledger::ExpenseLedger;
use crate::storage::DayArchive;

/// Outcome of a rollover check.
#[derive(Debug, Clone, PartialEq)]
pub enum Rollover {
    /// No day pointer existed yet; `today` was recorded and nothing archived.
    FirstRun { opened: NaiveDate },
    /// The pointer already matches `today`; nothing to do.
    SameDay,
    /// The previous day was closed out and the ledger reset.
    RolledOver { closed: DayRecord },
}

/// Owns the current-day pointer. Runs once per app activation, not on a
/// timer: only the comparison at the next activation matters. When several
/// days elapse between activations they collapse into a single rollover:
/// only the most recent prior day is archived and the intervening dates are
/// skipped. That loss of history is accepted behavior, not a defect.
pub struct DayRolloverManager;

impl DayRolloverManager {
    /// Compares `today` to the stored day pointer and closes out the prior
    /// day when they differ. Archive write failures are reported and do not
    /// block the ledger reset: a lost history row must not wedge the open
    /// day.
    pub fn check_and_roll(
        ledger: &mut ExpenseLedger,
        archive: &mut DayArchive,
        today: NaiveDate,
    ) -> Rollover {
        let previous = match archive.last_day() {
            None => {
                if let Err(err) = archive.set_last_day(today) {
                    tracing::warn!(%today, %err, "failed to persist first-run day pointer");
                }
                return Rollover::FirstRun { opened: today };
            }
            Some(day) if day == today => return Rollover::SameDay,
            Some(day) => day,
        };

        // After a process restart the in-memory ledger is empty; the
        // persisted mirror still holds the closing day's last known totals.
        let mut closing = ledger.budget_state();
        if closing.budget == 0.0 && closing.spent == 0.0 {
            closing = archive.read_open_day_snapshot();
        }
        let closed = DayRecord::new(previous, closing.budget, closing.spent);
        if let Err(err) = archive.archive_day(&closed) {
            tracing::warn!(date = %closed.date, %err, "archive write failed; day lost from history");
        }

        ledger.reset_for_new_day();
        if let Err(err) = archive.mirror_open_day(0.0, 0.0) {
            tracing::warn!(%err, "failed to reset open-day mirror");
        }
        if let Err(err) = archive.set_last_day(today) {
            tracing::warn!(%today, %err, "failed to advance day pointer");
        }
        tracing::info!(closed = %closed.date, opened = %today, "rolled ledger over to a new day");

        Rollover::RolledOver { closed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryPrefs};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn archive() -> DayArchive {
        DayArchive::new(Box::new(MemoryPrefs::new()))
    }

    #[test]
    fn first_run_records_pointer_without_archiving() {
        let mut ledger = ExpenseLedger::new();
        let mut archive = archive();

        let outcome = DayRolloverManager::check_and_roll(&mut ledger, &mut archive, date(2025, 1, 1));
        assert_eq!(
            outcome,
            Rollover::FirstRun {
                opened: date(2025, 1, 1)
            }
        );
        assert_eq!(archive.last_day(), Some(date(2025, 1, 1)));
        assert!(archive.list_closed_days(date(2025, 1, 1)).is_empty());
    }

    #[test]
    fn same_day_is_a_no_op_even_when_repeated() {
        let mut ledger = ExpenseLedger::new();
        ledger.set_budget(1000.0).unwrap();
        ledger.add_expense("Comida", 400.0, "").unwrap();
        let mut archive = archive();
        archive.set_last_day(date(2025, 1, 1)).unwrap();

        for _ in 0..2 {
            let outcome =
                DayRolloverManager::check_and_roll(&mut ledger, &mut archive, date(2025, 1, 1));
            assert_eq!(outcome, Rollover::SameDay);
        }
        assert_eq!(ledger.spent(), 400.0);
        assert_eq!(archive.last_day(), Some(date(2025, 1, 1)));
        assert!(archive.list_closed_days(date(2025, 1, 1)).is_empty());
    }

    #[test]
    fn new_day_archives_closing_totals_and_resets_ledger() {
        let mut ledger = ExpenseLedger::new();
        ledger.set_budget(1000.0).unwrap();
        ledger.add_expense("Comida", 400.0, "").unwrap();
        let mut archive = archive();
        archive.set_last_day(date(2025, 1, 1)).unwrap();
        archive.mirror_open_day(1000.0, 400.0).unwrap();

        let outcome =
            DayRolloverManager::check_and_roll(&mut ledger, &mut archive, date(2025, 1, 2));
        assert_eq!(
            outcome,
            Rollover::RolledOver {
                closed: DayRecord::new(date(2025, 1, 1), 1000.0, 400.0)
            }
        );

        assert!(!ledger.budget_is_set());
        assert_eq!(ledger.spent(), 0.0);
        assert_eq!(archive.last_day(), Some(date(2025, 1, 2)));

        let closed = archive.list_closed_days(date(2025, 1, 2));
        assert_eq!(closed, vec![DayRecord::new(date(2025, 1, 1), 1000.0, 400.0)]);
        assert_eq!(archive.read_open_day_snapshot().budget, 0.0);
        assert_eq!(archive.read_open_day_snapshot().spent, 0.0);
    }

    #[test]
    fn multi_day_gap_archives_only_the_most_recent_prior_day() {
        let mut ledger = ExpenseLedger::new();
        ledger.set_budget(500.0).unwrap();
        ledger.add_expense("Ocio", 100.0, "").unwrap();
        let mut archive = archive();
        archive.set_last_day(date(2025, 1, 1)).unwrap();

        let outcome =
            DayRolloverManager::check_and_roll(&mut ledger, &mut archive, date(2025, 1, 5));
        assert_eq!(
            outcome,
            Rollover::RolledOver {
                closed: DayRecord::new(date(2025, 1, 1), 500.0, 100.0)
            }
        );

        let closed = archive.list_closed_days(date(2025, 1, 5));
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].date, date(2025, 1, 1));
    }

    /// Store whose writes all fail, to prove the reset still happens.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_string(&self, _key: &str) -> Option<String> {
            Some("2025-01-01".to_string())
        }
        fn put_string(&mut self, _key: &str, _value: &str) -> crate::errors::Result<()> {
            Err(crate::errors::GastosError::Persistence("disk full".into()))
        }
        fn get_float(&self, _key: &str) -> f64 {
            0.0
        }
        fn put_float(&mut self, _key: &str, _value: f64) -> crate::errors::Result<()> {
            Err(crate::errors::GastosError::Persistence("disk full".into()))
        }
        fn remove(&mut self, _key: &str) -> crate::errors::Result<()> {
            Ok(())
        }
        fn keys(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn rollover_after_restart_falls_back_to_the_mirror() {
        // Fresh ledger as after a process restart; only the mirror knows
        // what the closing day looked like.
        let mut ledger = ExpenseLedger::new();
        let mut archive = archive();
        archive.set_last_day(date(2025, 1, 1)).unwrap();
        archive.mirror_open_day(800.0, 320.0).unwrap();

        let outcome =
            DayRolloverManager::check_and_roll(&mut ledger, &mut archive, date(2025, 1, 2));
        assert_eq!(
            outcome,
            Rollover::RolledOver {
                closed: DayRecord::new(date(2025, 1, 1), 800.0, 320.0)
            }
        );
    }

    #[test]
    fn archive_write_failure_does_not_block_the_reset() {
        let mut ledger = ExpenseLedger::new();
        ledger.set_budget(1000.0).unwrap();
        ledger.add_expense("Comida", 250.0, "").unwrap();
        let mut archive = DayArchive::new(Box::new(BrokenStore));

        let outcome =
            DayRolloverManager::check_and_roll(&mut ledger, &mut archive, date(2025, 1, 2));
        assert!(matches!(outcome, Rollover::RolledOver { .. }));
        assert!(!ledger.budget_is_set());
        assert_eq!(ledger.spent(), 0.0);
    }
}
