//! Completion Toggle Coordinator.
//!
//! Marking a workout done (or undoing the mark) is fire-and-forget for the
//! caller but pessimistic underneath: the store confirms first, and only then
//! does the view copy's `is_completed` flag change. A store failure is logged
//! and otherwise dropped, so the visible state always reflects confirmed
//! ground truth. Toggling to the state a workout already holds is a legal
//! no-op for us; the store is trusted to be idempotent.

use crate::controller::SharedState;
use crate::store::WorkoutStore;
use crate::types::WorkoutId;
use std::sync::Arc;

/// Applies confirm-then-apply completion toggles against the shared view state
#[derive(Clone)]
pub(crate) struct CompletionCoordinator {
    state: SharedState,
    store: Arc<dyn WorkoutStore>,
}

impl CompletionCoordinator {
    pub(crate) fn new(state: SharedState, store: Arc<dyn WorkoutStore>) -> Self {
        Self { state, store }
    }

    /// Toggle workout `id` to `completed`
    ///
    /// Marking records the completion against the workout's scheduled day, so
    /// the date is read from the view copy before the call. A confirmation
    /// arriving after the workout was evicted by a range change is dropped
    /// silently.
    pub(crate) async fn toggle(&self, id: WorkoutId, completed: bool) {
        let date = {
            let state = self.state.lock().expect("calendar state lock poisoned");
            match state.find(id) {
                Some(workout) => workout.date,
                None => {
                    tracing::warn!("toggle requested for workout {} outside the view", id);
                    return;
                }
            }
        };

        let result = if completed {
            self.store.mark_completed(id, date).await
        } else {
            self.store.unmark_completed(id).await
        };

        match result {
            Ok(()) => {
                let mut state = self.state.lock().expect("calendar state lock poisoned");
                match state.find_mut(id) {
                    Some(workout) => {
                        workout.is_completed = completed;
                        tracing::info!("workout {} marked completed={}", id, completed);
                    }
                    None => tracing::debug!(
                        "workout {} left the visible range while its toggle was in flight; \
                         skipping local update",
                        id
                    ),
                }
            }
            // Not surfaced: the view keeps showing the confirmed state
            Err(e) => tracing::warn!("completion toggle for workout {} failed: {}", id, e),
        }
    }
}
