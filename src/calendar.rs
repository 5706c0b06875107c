//! Week and month labels derived from a calendar date.
//!
//! Weeks run Monday through Sunday. A week is labelled `MMDD-MMDD` and filed
//! under its Monday's `YYYY-MM` month.

use chrono::{Datelike, Days, NaiveDate};

/// A Monday–Sunday span and its page title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSpan {
    pub label: String,
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
}

impl WeekSpan {
    /// The seven days of the span, Monday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.monday.iter_days().take(7)
    }
}

/// Zero-padded month and day, e.g. `0707`.
pub fn format_mmdd(date: NaiveDate) -> String {
    date.format("%m%d").to_string()
}

pub fn week_of(date: NaiveDate) -> WeekSpan {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let monday = date - Days::new(offset);
    let sunday = monday + Days::new(6);
    WeekSpan {
        label: format!("{}-{}", format_mmdd(monday), format_mmdd(sunday)),
        monday,
        sunday,
    }
}

/// Label of the week ending the day before `monday`.
pub fn prior_week_label(monday: NaiveDate) -> String {
    week_of(monday - Days::new(1)).label
}

pub fn month_label(monday: NaiveDate) -> String {
    monday.format("%Y-%m").to_string()
}
