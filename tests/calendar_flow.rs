//! End-to-end calendar scenarios against a recording store, including the
//! in-flight races: a navigation overtaking a slow fetch, and confirmations
//! arriving after their workout left the visible range.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use triplan_core::{
    CalendarController, DateRange, Error, MoveOutcome, MoveRejection, Result, SportType, Workout,
    WorkoutId, WorkoutStore, WorkoutType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn workout(id: WorkoutId, date: NaiveDate, sport: SportType, minutes: u32) -> Workout {
    Workout {
        id,
        date,
        sport_type: sport,
        duration_minutes: minutes,
        workout_type: WorkoutType::Endurance,
        is_completed: false,
    }
}

/// Which store operations should block on the gate
#[derive(Clone, Copy, PartialEq, Eq)]
enum Gated {
    Nothing,
    /// Fetches whose range starts on the given day
    FetchStarting(NaiveDate),
    Writes,
}

/// Serves a fixed collection filtered per range, records every call, and can
/// hold selected operations at a gate until the test releases them.
struct GatedStore {
    all: Vec<Workout>,
    calls: Mutex<Vec<String>>,
    gated: Gated,
    /// Signalled by the store once a gated call is inside the gate
    entered: Notify,
    /// Signalled by the test to let the gated call proceed
    release: Notify,
}

impl GatedStore {
    fn new(all: Vec<Workout>, gated: Gated) -> Arc<Self> {
        Arc::new(Self {
            all,
            calls: Mutex::new(Vec::new()),
            gated,
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn hold(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl WorkoutStore for GatedStore {
    async fn fetch_workouts(&self, range: DateRange) -> Result<Vec<Workout>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("fetch {}..{}", range.start, range.end));
        if self.gated == Gated::FetchStarting(range.start) {
            self.hold().await;
        }
        Ok(self
            .all
            .iter()
            .filter(|w| range.contains(w.date))
            .cloned()
            .collect())
    }

    async fn update_workout_date(&self, id: WorkoutId, new_date: NaiveDate) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("move {} {}", id, new_date));
        if self.gated == Gated::Writes {
            self.hold().await;
        }
        Ok(())
    }

    async fn mark_completed(&self, id: WorkoutId, date: NaiveDate) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("mark {} {}", id, date));
        if self.gated == Gated::Writes {
            self.hold().await;
        }
        Ok(())
    }

    async fn unmark_completed(&self, id: WorkoutId) -> Result<()> {
        self.calls.lock().unwrap().push(format!("unmark {}", id));
        if self.gated == Gated::Writes {
            self.hold().await;
        }
        Ok(())
    }
}

/// A March 2025 plan with one workout on a spillover day and one in April.
fn march_plan() -> Vec<Workout> {
    vec![
        workout(1, date(2025, 2, 24), SportType::Swimming, 26), // Feb spillover
        workout(2, date(2025, 3, 12), SportType::Running, 30),
        workout(3, date(2025, 3, 13), SportType::Cycling, 60),
        workout(4, date(2025, 4, 10), SportType::Running, 45),
    ]
}

#[tokio::test]
async fn test_month_view_covers_spillover_and_supports_queries() {
    let store = GatedStore::new(march_plan(), Gated::Nothing);
    let controller = CalendarController::new(store.clone(), date(2025, 3, 20));
    controller.refresh().await.unwrap();

    // The grid fetch is the full six-week range, not the calendar month
    assert_eq!(store.calls(), vec!["fetch 2025-02-24..2025-04-06".to_string()]);
    let ids: Vec<_> = controller.workouts().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let grid = controller.view(date(2025, 3, 20));
    assert_eq!(grid.days().len() % 7, 0);
    assert!(grid.weeks().all(|row| row.len() == 7));
    let spill = grid
        .days()
        .iter()
        .find(|d| d.date == date(2025, 2, 24))
        .unwrap();
    assert!(!spill.in_focused_month);
    assert_eq!(spill.workouts.len(), 1);

    // Standalone weekly query over the loaded collection
    let summary = controller.weekly_summary(date(2025, 3, 12));
    assert_eq!(summary.totals[&SportType::Running], 30);
    assert_eq!(summary.totals[&SportType::Cycling], 60);
    assert!(!summary.totals.contains_key(&SportType::Swimming));

    // Standalone decomposition of a visible workout
    let stages = triplan_core::decompose(&controller.workouts()[1]);
    let total: u32 = stages.iter().map(|s| s.duration).sum();
    assert_eq!(total, 30);
}

#[tokio::test]
async fn test_drag_flow_from_start_to_confirmed_drop() {
    let store = GatedStore::new(march_plan(), Gated::Nothing);
    let controller = CalendarController::new(store.clone(), date(2025, 3, 1));
    controller.refresh().await.unwrap();

    controller.drag_start(2).unwrap();
    // While dragging, only the source week accepts
    assert!(controller.drag_accepts(date(2025, 3, 10)));
    assert!(controller.drag_accepts(date(2025, 3, 16)));
    assert!(!controller.drag_accepts(date(2025, 3, 17)));

    // A cross-week drop is discarded locally: no store traffic, date intact
    let outcome = controller.drag_end(date(2025, 3, 17)).await.unwrap();
    assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::OutsideSourceWeek));
    assert!(!store.calls().iter().any(|c| c.starts_with("move")));

    controller.drag_start(2).unwrap();
    let outcome = controller.drag_end(date(2025, 3, 14)).await.unwrap();
    assert_eq!(outcome, MoveOutcome::Applied);
    assert!(store.calls().contains(&"move 2 2025-03-14".to_string()));
    let moved = controller
        .workouts()
        .into_iter()
        .find(|w| w.id == 2)
        .unwrap();
    assert_eq!(moved.date, date(2025, 3, 14));

    // The session ended with the drop
    assert!(!controller.drag_accepts(date(2025, 3, 14)));
    assert!(matches!(
        controller.drag_end(date(2025, 3, 15)).await,
        Err(Error::NoActiveDrag)
    ));
}

#[tokio::test]
async fn test_later_navigation_wins_over_a_slow_fetch() {
    // Gate the initial March fetch; its grid starts on February 24th
    let store = GatedStore::new(march_plan(), Gated::FetchStarting(date(2025, 2, 24)));
    let controller = CalendarController::new(store.clone(), date(2025, 3, 1));

    let slow = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    // Wait until the slow fetch is inside the store before navigating away
    store.entered.notified().await;

    controller.next_month().await.unwrap();
    let ids: Vec<_> = controller.workouts().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![4]);

    // The stale March payload arrives and must be discarded
    store.release.notify_one();
    slow.await.unwrap().unwrap();
    let ids: Vec<_> = controller.workouts().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![4]);
    assert_eq!(controller.focused_month(), date(2025, 4, 1));
}

#[tokio::test]
async fn test_toggle_resolving_after_eviction_mutates_nothing() {
    let store = GatedStore::new(march_plan(), Gated::Writes);
    let controller = CalendarController::new(store.clone(), date(2025, 3, 1));
    controller.refresh().await.unwrap();

    let toggle = tokio::spawn({
        let controller = controller.clone();
        async move { controller.toggle_completion(2, true).await }
    });
    store.entered.notified().await;

    // Navigate away while the mark is in flight; workout 2 gets evicted
    controller.next_month().await.unwrap();
    store.release.notify_one();
    toggle.await.unwrap();

    // The confirmation was dropped silently; the April view is untouched
    let workouts = controller.workouts();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].id, 4);
    assert!(!workouts[0].is_completed);
    assert!(store.calls().contains(&"mark 2 2025-03-12".to_string()));
}

#[tokio::test]
async fn test_reschedule_resolving_after_eviction_still_reports_applied() {
    let store = GatedStore::new(march_plan(), Gated::Writes);
    let controller = CalendarController::new(store.clone(), date(2025, 3, 1));
    controller.refresh().await.unwrap();

    let slow_move = tokio::spawn({
        let controller = controller.clone();
        async move { controller.propose_move(2, date(2025, 3, 14)).await }
    });
    store.entered.notified().await;

    controller.next_month().await.unwrap();
    store.release.notify_one();

    // The write reached the store, so the outcome is Applied; only the local
    // update was skipped, and the evicted workout never resurfaces
    let outcome = slow_move.await.unwrap().unwrap();
    assert_eq!(outcome, MoveOutcome::Applied);
    assert!(controller.workouts().iter().all(|w| w.id != 2));
}

#[tokio::test]
async fn test_completion_round_trip_with_a_failure_in_between() {
    let store = GatedStore::new(march_plan(), Gated::Nothing);
    let controller = CalendarController::new(store.clone(), date(2025, 3, 1));
    controller.refresh().await.unwrap();

    controller.toggle_completion(3, true).await;
    controller.toggle_completion(3, false).await;
    controller.toggle_completion(3, true).await;

    let completed = controller
        .workouts()
        .into_iter()
        .find(|w| w.id == 3)
        .unwrap()
        .is_completed;
    assert!(completed);

    let toggle_calls: Vec<_> = store
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("mark") || c.starts_with("unmark"))
        .collect();
    assert_eq!(
        toggle_calls,
        vec![
            "mark 3 2025-03-13".to_string(),
            "unmark 3".to_string(),
            "mark 3 2025-03-13".to_string(),
        ]
    );
}
