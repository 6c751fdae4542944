//! Calendar View-State Controller.
//!
//! Owns the view copy of the workouts for the visible month, the focused-month
//! anchor, and the active drag session, and orchestrates the rescheduler, the
//! completion coordinator, and fetches through the injected store.
//!
//! The grid and weekly summaries are derived views: recomputed from the raw
//! collection on every query, never patched incrementally, so a workout moving
//! between weeks can never leave a stale cell behind.

use crate::completion::CompletionCoordinator;
use crate::error::Result;
use crate::grid::{first_of_month, grid_range, month_grid, step_month, MonthGrid};
use crate::reschedule::{DragSession, MoveOutcome, Rescheduler};
use crate::store::WorkoutStore;
use crate::summary::{summarize, WeeklySportSummary};
use crate::types::{DateRange, Workout, WorkoutId};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

/// Mutable calendar state shared by the controller and its components
///
/// The lock is never held across an await; external calls run unlocked and
/// re-acquire it to apply their result.
pub(crate) struct CalendarState {
    /// First day of the focused month
    pub(crate) anchor: NaiveDate,
    /// The most recently requested fetch range (the full grid, see `grid_range`)
    pub(crate) range: DateRange,
    /// View copies of the workouts inside `range`; nothing outside it survives
    /// a navigation
    pub(crate) workouts: Vec<Workout>,
    /// The in-flight drag interaction, if any
    pub(crate) drag: Option<DragSession>,
    /// Bumped on every navigation so a stale fetch result can be recognized
    /// and discarded
    pub(crate) epoch: u64,
}

pub(crate) type SharedState = Arc<Mutex<CalendarState>>;

impl CalendarState {
    pub(crate) fn shared(reference: NaiveDate, workouts: Vec<Workout>) -> SharedState {
        let anchor = first_of_month(reference);
        Arc::new(Mutex::new(CalendarState {
            anchor,
            range: grid_range(anchor),
            workouts,
            drag: None,
            epoch: 0,
        }))
    }

    pub(crate) fn find(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: WorkoutId) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id == id)
    }
}

/// The calendar core's entry point for a host UI
///
/// Cheaply cloneable; clones share the same state, so a host can run a
/// reschedule, a toggle, and a navigation fetch concurrently from different
/// tasks. Operations that touch the store are async; everything else is a
/// synchronous pure computation over the current state.
#[derive(Clone)]
pub struct CalendarController {
    state: SharedState,
    store: Arc<dyn WorkoutStore>,
    rescheduler: Rescheduler,
    completion: CompletionCoordinator,
}

impl CalendarController {
    /// Create a controller focused on the month containing `reference`
    ///
    /// No I/O happens here; call [`refresh`](Self::refresh) to load the
    /// initial range.
    pub fn new(store: Arc<dyn WorkoutStore>, reference: NaiveDate) -> Self {
        let state = CalendarState::shared(reference, Vec::new());
        Self {
            rescheduler: Rescheduler::new(state.clone(), store.clone()),
            completion: CompletionCoordinator::new(state.clone(), store.clone()),
            state,
            store,
        }
    }

    /// Fetch the current grid range from the store
    ///
    /// Used on initial mount and whenever the host wants to re-sync without
    /// navigating.
    pub async fn refresh(&self) -> Result<()> {
        let (range, epoch) = {
            let state = self.lock();
            (state.range, state.epoch)
        };
        self.fetch_into(range, epoch).await
    }

    /// Navigate to the previous month and fetch its grid range
    pub async fn prev_month(&self) -> Result<()> {
        self.step(-1).await
    }

    /// Navigate to the next month and fetch its grid range
    pub async fn next_month(&self) -> Result<()> {
        self.step(1).await
    }

    async fn step(&self, delta: i32) -> Result<()> {
        let (anchor, range, epoch) = {
            let mut state = self.lock();
            state.anchor = step_month(state.anchor, delta);
            state.range = grid_range(state.anchor);
            // Nothing outside the most recently requested range is retained
            state.workouts.clear();
            state.epoch += 1;
            (state.anchor, state.range, state.epoch)
        };
        tracing::info!(
            "navigated to month of {}, fetching {}..{}",
            anchor,
            range.start,
            range.end
        );
        self.fetch_into(range, epoch).await
    }

    /// Install a fetch result unless a later navigation superseded it
    async fn fetch_into(&self, range: DateRange, epoch: u64) -> Result<()> {
        let workouts = self.store.fetch_workouts(range).await?;

        let mut state = self.lock();
        if state.epoch == epoch {
            tracing::debug!(
                "loaded {} workouts for {}..{}",
                workouts.len(),
                range.start,
                range.end
            );
            state.workouts = workouts;
        } else {
            tracing::debug!(
                "discarding stale fetch for {}..{}: view has moved on",
                range.start,
                range.end
            );
        }
        Ok(())
    }

    /// The grid of calendar days for the focused month
    ///
    /// `today` is supplied by the caller (it is presentation context, and
    /// keeping it out makes the computation pure).
    pub fn view(&self, today: NaiveDate) -> MonthGrid {
        let state = self.lock();
        month_grid(state.anchor, today, &state.workouts)
    }

    /// Per-sport duration totals for the loaded workouts in `reference`'s week
    pub fn weekly_summary(&self, reference: NaiveDate) -> WeeklySportSummary {
        let state = self.lock();
        summarize(&state.workouts, reference)
    }

    /// First day of the focused month
    pub fn focused_month(&self) -> NaiveDate {
        self.lock().anchor
    }

    /// The most recently requested fetch range (the full visible grid)
    pub fn fetch_range(&self) -> DateRange {
        self.lock().range
    }

    /// Snapshot of the current view copies
    pub fn workouts(&self) -> Vec<Workout> {
        self.lock().workouts.clone()
    }

    /// Open a drag session for workout `id`
    pub fn drag_start(&self, id: WorkoutId) -> Result<DragSession> {
        self.rescheduler.begin(id)
    }

    /// Whether `date` is an acceptable drop target for the active drag
    pub fn drag_accepts(&self, date: NaiveDate) -> bool {
        self.rescheduler.accepts(date)
    }

    /// Abandon the active drag session, if any
    pub fn drag_cancel(&self) {
        self.rescheduler.cancel()
    }

    /// Drop the dragged workout on `target`, ending the session
    pub async fn drag_end(&self, target: NaiveDate) -> Result<MoveOutcome> {
        self.rescheduler.finish(target).await
    }

    /// Validate and apply a reschedule outside of a drag interaction
    pub async fn propose_move(&self, id: WorkoutId, target: NaiveDate) -> Result<MoveOutcome> {
        self.rescheduler.propose_move(id, target).await
    }

    /// Toggle workout `id`'s completion flag, confirm-then-apply
    pub async fn toggle_completion(&self, id: WorkoutId, completed: bool) {
        self.completion.toggle(id, completed).await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CalendarState> {
        self.state.lock().expect("calendar state lock poisoned")
    }
}
