use chrono::{DateTime, Local, NaiveDate};

/// Clock abstracts access to the wall clock so rollover decisions remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local timestamp.
    fn now(&self) -> DateTime<Local>;

    /// Returns the current calendar day. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
            .and_hms_opt(12, 0, 0)
            .expect("noon is always valid")
            .and_local_timezone(Local)
            .single()
            .expect("noon never lands on a DST gap")
    }

    fn today(&self) -> NaiveDate {
        self.0
    }
}
