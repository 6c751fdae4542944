#![forbid(unsafe_code)]

//! Calendar scheduling and workout-decomposition core for the Triplan
//! training-plan manager.
//!
//! This crate provides:
//! - Domain types (workouts, sports, date ranges)
//! - The month grid model with Monday-start weeks and spillover days
//! - Week-constrained drag rescheduling
//! - Confirm-then-apply completion toggling
//! - Weekly per-sport duration aggregation
//! - Deterministic decomposition of a workout into timed training stages
//!
//! Persistence, transport, authentication, and rendering live in the host
//! application; it injects a [`WorkoutStore`] and drives a
//! [`CalendarController`].

pub mod types;
pub mod error;
pub mod logging;
pub mod week;
pub mod grid;
pub mod stages;
pub mod summary;
pub mod store;
pub mod reschedule;
pub mod completion;
pub mod controller;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use grid::{grid_range, month_grid, step_month, CalendarDay, MonthGrid};
pub use stages::{decompose, interval_profile, IntervalProfile, StageRole, WorkoutStage};
pub use summary::{summarize, WeeklySportSummary};
pub use store::WorkoutStore;
pub use week::{same_week, week_end, week_range, week_start};
pub use reschedule::{DragSession, MoveOutcome, MoveRejection};
pub use controller::CalendarController;
