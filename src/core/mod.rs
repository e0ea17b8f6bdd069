//! Engine services: day rollover, monthly summary, and the intent-driven
//! facade the presentation layer talks to.

pub mod daybook;
pub mod rollover;
pub mod summary;
pub mod time;

pub use daybook::{DayBook, Intent};
pub use rollover::{DayRolloverManager, Rollover};
pub use summary::MonthlySummaryBuilder;
pub use time::{Clock, SystemClock};
