//! Drag-Constrained Rescheduler.
//!
//! Moving a workout is restricted to the Monday-start week it was originally
//! scheduled in; that is a product rule, so a cross-week drop is rejected
//! locally without ever reaching the store. A valid move is pessimistic: the
//! store confirms first, then the local view copy's date is replaced.
//!
//! The drag session is ephemeral controller state, never part of the workout
//! itself. It records the source week for the duration of one interaction and
//! is cleared on every drag end, whether the move applied, failed, or was
//! cancelled.

use crate::controller::SharedState;
use crate::error::{Error, Result};
use crate::store::WorkoutStore;
use crate::types::WorkoutId;
use crate::week::{same_week, week_start};
use chrono::NaiveDate;
use std::sync::Arc;

/// The in-flight drag interaction: which workout, and which week it may land in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub workout_id: WorkoutId,
    /// Monday of the week the workout was in when the drag started
    pub source_week: NaiveDate,
}

/// Why a proposed move was discarded locally
///
/// These are expected interaction outcomes, not errors; no store call is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRejection {
    /// The target date is outside the workout's Monday-start week
    OutsideSourceWeek,
    /// The target date is the day the workout is already on
    SameDate,
}

/// Result of a proposed move that did not fail in the store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The store confirmed the new date (and the view copy was updated if the
    /// workout is still visible)
    Applied,
    /// Discarded locally; no external call was made
    Rejected(MoveRejection),
}

/// Applies week-constrained reschedules against the shared view state
#[derive(Clone)]
pub(crate) struct Rescheduler {
    state: SharedState,
    store: Arc<dyn WorkoutStore>,
}

impl Rescheduler {
    pub(crate) fn new(state: SharedState, store: Arc<dyn WorkoutStore>) -> Self {
        Self { state, store }
    }

    /// Open a drag session for a visible workout
    ///
    /// Only one session may be active at a time; the UI guarantees this, but
    /// the contract rejects overlap on its own as well.
    pub(crate) fn begin(&self, id: WorkoutId) -> Result<DragSession> {
        let mut state = self.state.lock().expect("calendar state lock poisoned");
        if let Some(active) = &state.drag {
            return Err(Error::DragInProgress(active.workout_id));
        }

        let workout = state.find(id).ok_or(Error::WorkoutNotVisible(id))?;
        let session = DragSession {
            workout_id: id,
            source_week: week_start(workout.date),
        };
        tracing::debug!(
            "drag started for workout {} (week of {})",
            id,
            session.source_week
        );
        state.drag = Some(session);
        Ok(session)
    }

    /// Whether `date` is an acceptable drop target for the active session
    ///
    /// Always false while no drag is active.
    pub(crate) fn accepts(&self, date: NaiveDate) -> bool {
        let state = self.state.lock().expect("calendar state lock poisoned");
        match &state.drag {
            Some(session) => week_start(date) == session.source_week,
            None => false,
        }
    }

    /// Abandon the active session, if any
    pub(crate) fn cancel(&self) {
        let mut state = self.state.lock().expect("calendar state lock poisoned");
        if let Some(session) = state.drag.take() {
            tracing::debug!("drag cancelled for workout {}", session.workout_id);
        }
    }

    /// Close the active session by dropping on `target`
    ///
    /// The session ends here no matter how the move turns out.
    pub(crate) async fn finish(&self, target: NaiveDate) -> Result<MoveOutcome> {
        let session = {
            let mut state = self.state.lock().expect("calendar state lock poisoned");
            state.drag.take().ok_or(Error::NoActiveDrag)?
        };
        self.propose_move(session.workout_id, target).await
    }

    /// Validate and apply a date change for workout `id`
    ///
    /// Local rejections (same date, outside the source week) return
    /// [`MoveOutcome::Rejected`] without touching the store. Otherwise the
    /// store confirms first; on failure the error propagates and the view copy
    /// keeps its pre-move date. A confirmation arriving after the workout was
    /// evicted by a range change still counts as applied, since the
    /// persistence write succeeded; only the local update is dropped.
    pub(crate) async fn propose_move(
        &self,
        id: WorkoutId,
        target: NaiveDate,
    ) -> Result<MoveOutcome> {
        {
            let state = self.state.lock().expect("calendar state lock poisoned");
            let workout = state.find(id).ok_or(Error::WorkoutNotVisible(id))?;
            if target == workout.date {
                tracing::debug!("workout {} is already on {}; nothing to move", id, target);
                return Ok(MoveOutcome::Rejected(MoveRejection::SameDate));
            }
            if !same_week(workout.date, target) {
                tracing::warn!(
                    "rejected move of workout {} from {} to {}: outside its week",
                    id,
                    workout.date,
                    target
                );
                return Ok(MoveOutcome::Rejected(MoveRejection::OutsideSourceWeek));
            }
        }

        self.store.update_workout_date(id, target).await?;

        let mut state = self.state.lock().expect("calendar state lock poisoned");
        match state.find_mut(id) {
            Some(workout) => {
                workout.date = target;
                tracing::info!("workout {} rescheduled to {}", id, target);
            }
            None => tracing::debug!(
                "workout {} left the visible range while its move was in flight; \
                 skipping local update",
                id
            ),
        }
        Ok(MoveOutcome::Applied)
    }
}
