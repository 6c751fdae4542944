//! Calendar Range Model: the visible month grid and month navigation.
//!
//! The grid for a month covers whole Monday-start weeks: the Monday on or
//! before the 1st through the Sunday on or after the last day, so days from
//! adjacent months spill in to complete the rows. Everything here is a pure
//! computation over a reference date and the raw workout collection; grids
//! are rebuilt per query, never patched in place.

use crate::types::{DateRange, Workout};
use crate::week::{week_end, week_start};
use chrono::{Datelike, Duration, NaiveDate};

/// One cell of the month grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the spillover days of adjacent months
    pub in_focused_month: bool,
    pub is_today: bool,
    /// Workouts scheduled on this date, in input order
    pub workouts: Vec<Workout>,
}

/// The full set of calendar cells for one focused month
#[derive(Clone, Debug)]
pub struct MonthGrid {
    focused_month: NaiveDate,
    days: Vec<CalendarDay>,
}

impl MonthGrid {
    /// First day of the focused month
    pub fn focused_month(&self) -> NaiveDate {
        self.focused_month
    }

    /// All cells in order, Monday of the first row through Sunday of the last
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// The cells partitioned into week rows of seven
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }
}

/// First day of the month containing `reference`
pub fn first_of_month(reference: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)
        .expect("every month has a first day")
}

/// Step the month anchor by `delta` whole months
///
/// The anchor is always a first-of-month, so no end-of-month clamping can
/// occur.
pub fn step_month(reference: NaiveDate, delta: i32) -> NaiveDate {
    let months0 = reference.year() * 12 + reference.month0() as i32 + delta;
    let year = months0.div_euclid(12);
    let month = months0.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).expect("every month has a first day")
}

/// The date range the grid for `reference`'s month covers
///
/// This is also the fetch range: workouts on spillover days are visible, so
/// the controller requests this superset rather than the calendar month.
pub fn grid_range(reference: NaiveDate) -> DateRange {
    let first = first_of_month(reference);
    let last = step_month(first, 1) - Duration::days(1);
    DateRange::new(week_start(first), week_end(last))
}

/// Build the grid for `reference`'s month from the raw workout collection
///
/// `today` is passed in by the caller so the computation stays pure. Workouts
/// outside the grid range are ignored.
pub fn month_grid(reference: NaiveDate, today: NaiveDate, workouts: &[Workout]) -> MonthGrid {
    let focused = first_of_month(reference);
    let days = grid_range(reference)
        .days()
        .map(|date| CalendarDay {
            date,
            in_focused_month: date.year() == focused.year() && date.month() == focused.month(),
            is_today: date == today,
            workouts: workouts
                .iter()
                .filter(|w| w.date == date)
                .cloned()
                .collect(),
        })
        .collect();

    MonthGrid {
        focused_month: focused,
        days,
    }
}
