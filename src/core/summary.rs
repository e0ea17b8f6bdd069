//! Builds the per-day history view from the archive and the open day.

use chrono::NaiveDate;

use crate::domain::DaySummary;
use crate::storage::DayArchive;

/// Stateless builder producing the monthly summary rows.
pub struct MonthlySummaryBuilder;

impl MonthlySummaryBuilder {
    /// One row for `today` from the live-totals mirror, marked active, plus
    /// one row per closed day from the archive. Closed days where both
    /// budget and spent are zero carry no information and are dropped.
    /// Rows are ordered newest first.
    pub fn build(archive: &DayArchive, today: NaiveDate) -> Vec<DaySummary> {
        let open = archive.read_open_day_snapshot();
        let mut rows = vec![DaySummary::new(today, open.budget, open.spent, true)];

        rows.extend(
            archive
                .list_closed_days(today)
                .into_iter()
                .filter(|record| record.budget > 0.0 || record.spent > 0.0)
                .map(|record| DaySummary::new(record.date, record.budget, record.spent, false)),
        );

        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}
