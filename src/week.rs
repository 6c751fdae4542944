//! Monday-start week arithmetic.
//!
//! Every weekly window in the system (grid rows, the reschedule constraint,
//! weekly summaries) uses the same convention: weeks run Monday through
//! Sunday.

use crate::types::DateRange;
use chrono::{Datelike, Duration, NaiveDate};

/// The Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The Sunday on or after `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// The full Monday-through-Sunday week containing `date`
pub fn week_range(date: NaiveDate) -> DateRange {
    DateRange::new(week_start(date), week_end(date))
}

/// Whether two dates fall in the same Monday-start week
pub fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
    week_start(a) == week_start(b)
}
