//! Weekly Aggregator: per-sport duration totals for one week.

use crate::types::{DateRange, SportType, Workout};
use crate::week::week_range;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Summed workout minutes per sport for one Monday-start week
///
/// Sports with no workouts in the week are absent from the map, not
/// zero-filled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeeklySportSummary {
    /// The Monday-through-Sunday window the totals cover
    pub week: DateRange,
    pub totals: HashMap<SportType, u32>,
}

/// Total `duration_minutes` per sport over the week containing `reference`
///
/// Pure and order-independent: the result is the same for any permutation of
/// `workouts`.
pub fn summarize(workouts: &[Workout], reference: NaiveDate) -> WeeklySportSummary {
    let week = week_range(reference);
    let mut totals: HashMap<SportType, u32> = HashMap::new();

    for workout in workouts.iter().filter(|w| week.contains(w.date)) {
        *totals.entry(workout.sport_type).or_default() += workout.duration_minutes;
    }

    WeeklySportSummary { week, totals }
}
