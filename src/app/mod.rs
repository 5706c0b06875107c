pub mod dispatch;
pub mod report;
pub mod weekly;

pub use weekly::{RunMode, WeeklyOutcome, WeeklyReport, run_weekly};
