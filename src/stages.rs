//! Stage Decomposition Engine.
//!
//! Expands a single workout record into the ordered, timed stages an athlete
//! executes: warm-up, main block (steady effort or interval cycles), and
//! cool-down. Deterministic, driven entirely by the workout's own fields, and
//! the stage durations always sum to the workout's total duration.
//!
//! Stages are produced transiently for the workout-detail view; nothing here
//! is persisted.

use crate::types::{SportType, Workout, WorkoutType};
use serde::{Deserialize, Serialize};

/// Warm-up and cool-down bracket length, minutes each
const BRACKET_MINUTES: u32 = 10;

/// Semantic role of a stage within the session
///
/// The role is the contract; descriptions are free-form presentation text.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageRole {
    WarmUp,
    /// Steady effort in a moderate intensity zone (endurance main block)
    Steady,
    /// High-intensity work segment of an interval cycle
    Work,
    /// Low-intensity segment: interval rest or a recovery main block
    Recovery,
    CoolDown,
}

/// A contiguous timed segment of a workout's execution plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutStage {
    /// Length in minutes, always positive
    pub duration: u32,
    pub role: StageRole,
    pub description: String,
}

/// Fixed (work, rest) cycle lengths for interval sessions, per sport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalProfile {
    pub work_minutes: u32,
    pub rest_minutes: u32,
}

impl IntervalProfile {
    pub fn cycle_minutes(&self) -> u32 {
        self.work_minutes + self.rest_minutes
    }
}

/// The interval timing constants for a sport
pub fn interval_profile(sport: SportType) -> IntervalProfile {
    match sport {
        SportType::Running => IntervalProfile {
            work_minutes: 3,
            rest_minutes: 2,
        },
        SportType::Cycling => IntervalProfile {
            work_minutes: 4,
            rest_minutes: 2,
        },
        SportType::Swimming => IntervalProfile {
            work_minutes: 2,
            rest_minutes: 1,
        },
    }
}

fn activity_noun(sport: SportType) -> &'static str {
    match sport {
        SportType::Running => "run",
        SportType::Cycling => "ride",
        SportType::Swimming => "swim",
    }
}

fn warm_up(sport: SportType, duration: u32) -> WorkoutStage {
    WorkoutStage {
        duration,
        role: StageRole::WarmUp,
        description: format!(
            "Warm-up: easy {} to prepare the body for the effort",
            activity_noun(sport)
        ),
    }
}

fn cool_down(sport: SportType, duration: u32) -> WorkoutStage {
    WorkoutStage {
        duration,
        role: StageRole::CoolDown,
        description: format!(
            "Cool-down: easy {} to bring the heart rate back down",
            activity_noun(sport)
        ),
    }
}

fn steady(sport: SportType, duration: u32) -> WorkoutStage {
    WorkoutStage {
        duration,
        role: StageRole::Steady,
        description: format!(
            "Steady {} in zone 2 (comfortable pace, holding a conversation is possible)",
            activity_noun(sport)
        ),
    }
}

fn easy_recovery(sport: SportType, duration: u32) -> WorkoutStage {
    WorkoutStage {
        duration,
        role: StageRole::Recovery,
        description: format!(
            "Recovery {} in zone 1 (very easy pace, full recovery)",
            activity_noun(sport)
        ),
    }
}

fn interval_work(duration: u32) -> WorkoutStage {
    WorkoutStage {
        duration,
        role: StageRole::Work,
        description: "Surge at high effort (zone 4-5)".to_string(),
    }
}

fn interval_rest(sport: SportType, duration: u32) -> WorkoutStage {
    WorkoutStage {
        duration,
        role: StageRole::Recovery,
        description: format!("Slow {} to recover between efforts", activity_noun(sport)),
    }
}

/// Decompose a workout into its ordered execution stages
///
/// Stage durations always sum to `workout.duration_minutes` exactly; a sum
/// mismatch would be a programming defect, not a runtime condition.
///
/// Workouts of at least 10 minutes get a 5-minute warm-up and a 5-minute
/// cool-down bracketing the main block. Shorter workouts (where the brackets
/// would not fit) are emitted as a single stage in the workout type's main
/// role; at exactly 10 minutes the brackets alone fill the session and no
/// zero-length main stage is emitted.
pub fn decompose(workout: &Workout) -> Vec<WorkoutStage> {
    let sport = workout.sport_type;
    let total = workout.duration_minutes;

    let stages = if total < BRACKET_MINUTES {
        // Too short for the brackets: one stage in the main role
        vec![match workout.workout_type {
            WorkoutType::Endurance => steady(sport, total),
            WorkoutType::Recovery => easy_recovery(sport, total),
            WorkoutType::Interval => interval_work(total),
        }]
    } else {
        let main_budget = total - BRACKET_MINUTES;
        let mut stages = vec![warm_up(sport, BRACKET_MINUTES / 2)];

        if main_budget > 0 {
            match workout.workout_type {
                WorkoutType::Endurance => stages.push(steady(sport, main_budget)),
                WorkoutType::Recovery => stages.push(easy_recovery(sport, main_budget)),
                WorkoutType::Interval => tile_intervals(&mut stages, sport, main_budget),
            }
        }

        stages.push(cool_down(sport, BRACKET_MINUTES / 2));
        stages
    };

    debug_assert_eq!(
        stages.iter().map(|s| s.duration).sum::<u32>(),
        total,
        "stage durations must sum to the workout duration"
    );
    stages
}

/// Tile `main_budget` minutes with the sport's (work, rest) cycles
///
/// Every full cycle emits both its segments; the cool-down always follows, so
/// a trailing rest is never the last stage of the plan. Leftover time shorter
/// than a full cycle becomes one more work segment plus the residual as rest
/// (if the work length fits), or a single rest segment (if not).
fn tile_intervals(stages: &mut Vec<WorkoutStage>, sport: SportType, main_budget: u32) {
    let profile = interval_profile(sport);
    let cycle = profile.cycle_minutes();
    let full_cycles = main_budget / cycle;
    let leftover = main_budget % cycle;

    for _ in 0..full_cycles {
        stages.push(interval_work(profile.work_minutes));
        stages.push(interval_rest(sport, profile.rest_minutes));
    }

    if leftover >= profile.work_minutes {
        stages.push(interval_work(profile.work_minutes));
        let residual = leftover - profile.work_minutes;
        if residual > 0 {
            stages.push(interval_rest(sport, residual));
        }
    } else if leftover > 0 {
        stages.push(interval_rest(sport, leftover));
    }
}
