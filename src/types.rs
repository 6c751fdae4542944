//! Core domain types for the calendar scheduling core.
//!
//! This module defines the types the rest of the system is built on:
//! - Workouts as delivered by the external planner
//! - Sport and workout-type enums
//! - Inclusive date ranges used for fetching and week windows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workout identity, assigned by the external planner
pub type WorkoutId = i64;

// ============================================================================
// Workout Types
// ============================================================================

/// Sport a workout belongs to; determines interval timing constants
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    Running,
    Cycling,
    Swimming,
}

/// Training intent of a session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Endurance,
    Interval,
    Recovery,
}

/// A planned workout as held in the visible-range view copy
///
/// Owned externally: created by the planner service and persisted behind the
/// [`crate::WorkoutStore`] seam. The core only ever mutates `date` (on a
/// confirmed reschedule) and `is_completed` (on a confirmed toggle).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workout {
    pub id: WorkoutId,
    /// Scheduled day; no time-of-day component exists in the plan
    pub date: NaiveDate,
    pub sport_type: SportType,
    pub duration_minutes: u32,
    pub workout_type: WorkoutType,
    /// Absent in planner output until first marked, hence the default
    #[serde(default)]
    pub is_completed: bool,
}

// ============================================================================
// Date Ranges
// ============================================================================

/// An inclusive range of calendar days
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end, "range start {} after end {}", start, end);
        Self { start, end }
    }

    /// Whether `date` falls inside the range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both endpoints
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate every day in the range in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

// ============================================================================
// Presentation Helpers
// ============================================================================

/// Format a minute count the way the workout views display it
///
/// Examples: `45min`, `2h`, `1h 30min`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours == 0 {
        format!("{}min", mins)
    } else if mins == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}min", hours, mins)
    }
}
