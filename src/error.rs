//! Error types for the triplan_core library.

use crate::types::WorkoutId;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for calendar operations
///
/// Domain rejections the calendar handles locally (a move crossing the week
/// boundary, a move to the workout's current date) are not errors; they are
/// [`crate::reschedule::MoveOutcome`] values. Variants here cover collaborator
/// failures and misuse of the component contracts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The external persistence collaborator reported a failure
    #[error("store error: {0}")]
    Store(String),

    /// A drag session is already active; only one may run at a time
    #[error("drag session already active for workout {0}")]
    DragInProgress(WorkoutId),

    /// A drag-end arrived with no session to close
    #[error("no active drag session")]
    NoActiveDrag,

    /// The workout is not part of the currently visible range
    #[error("workout {0} is not in the visible range")]
    WorkoutNotVisible(WorkoutId),
}
