//! The persistence collaborator seam.
//!
//! The calendar core never talks to storage or transport directly; the host
//! application injects an implementation of [`WorkoutStore`] (typically an
//! HTTP client for the planner backend). The core trusts the store to
//! serialize writes per workout.

use crate::error::Result;
use crate::types::{DateRange, Workout, WorkoutId};
use async_trait::async_trait;
use chrono::NaiveDate;

/// External persistence operations the calendar core depends on
///
/// Implementations should translate their transport failures into
/// [`crate::Error::Store`]. `mark_completed` carries the workout's scheduled
/// date because the backend records completion against the day; `unmark` only
/// needs the identity.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Fetch all workouts scheduled inside `range` (both ends inclusive)
    async fn fetch_workouts(&self, range: DateRange) -> Result<Vec<Workout>>;

    /// Persist a reschedule of workout `id` to `new_date`
    async fn update_workout_date(&self, id: WorkoutId, new_date: NaiveDate) -> Result<()>;

    /// Record workout `id` as completed on `date`
    async fn mark_completed(&self, id: WorkoutId, date: NaiveDate) -> Result<()>;

    /// Clear the completion mark of workout `id`
    async fn unmark_completed(&self, id: WorkoutId) -> Result<()>;
}
