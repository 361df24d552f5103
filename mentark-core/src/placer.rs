//! Greedy first-fit placement of prioritized tasks into scored windows.
//!
//! Deliberately not a bin-packing solver: student task lists are small and a
//! human-plausible schedule beats a globally optimal one that reads as noise
//! on a calendar.

use crate::energy::EnergyProfile;
use crate::prioritize::prioritize;
use crate::schedule::{EnergyOptimization, ScheduleResult, TimeBlock};
use crate::slots::{score_windows, TimeWindow};
use crate::task::Task;

/// Windows scoring below this are refused rather than forced.
pub const MIN_PLACEMENT_SCORE: f64 = 3.0;

/// Best-effort side channel for "couldn't place this" advice.
///
/// Implementations must swallow their own failures and answer `None`;
/// scheduling never fails because a recommendation did.
pub trait Recommender {
    fn recommend(&self, task: &Task, profile: &EnergyProfile) -> Option<String>;
}

/// Place every task or explain why it couldn't be placed.
///
/// Tasks are consumed in [`prioritize`] order, each taking the best-scoring
/// window it fits into without touching an already-placed block or a
/// pre-existing event. A task is tried exactly once per run; failures land
/// in `conflicts` and are never retried.
pub fn build_schedule(
    tasks: &[Task],
    profile: &EnergyProfile,
    windows: &[TimeWindow],
    existing_events: &[TimeWindow],
    recommender: Option<&dyn Recommender>,
) -> ScheduleResult {
    let ordered = prioritize(tasks);

    let mut blocks: Vec<TimeBlock> = Vec::new();
    let mut conflicts: Vec<String> = Vec::new();
    let mut recommendations: Vec<String> = Vec::new();
    let mut scheduled_minutes: i64 = 0;

    let available_minutes: i64 = windows.iter().map(|w| w.minutes()).sum();

    // Intervals the overlap check consults; grows as tasks are placed.
    let mut occupied: Vec<TimeWindow> = existing_events.to_vec();

    for task in &ordered {
        if !task.dependencies.is_empty() {
            let unmet = task
                .dependencies
                .iter()
                .any(|dep| !blocks.iter().any(|b| &b.task_id == dep));
            if unmet {
                conflicts.push(format!(
                    "Task \"{}\" depends on unscheduled tasks",
                    task.title
                ));
                continue;
            }
        }

        let candidates = score_windows(profile, task.energy_required, windows);

        let mut placed = false;
        for cand in candidates {
            if cand.score < MIN_PLACEMENT_SCORE {
                continue;
            }

            let start = cand.window.start;
            // Checked: a duration too large to represent can never fit, and
            // placement must not panic on unvalidated input.
            let Some(duration) = chrono::Duration::try_minutes(task.estimated_minutes) else {
                continue;
            };
            let Some(end) = start.checked_add_signed(duration) else {
                continue;
            };
            if end > cand.window.end {
                continue;
            }

            // Half-open overlap test against events and earlier placements.
            let collides = occupied
                .iter()
                .any(|o| start < o.end && end > o.start);
            if collides {
                continue;
            }

            blocks.push(TimeBlock::for_task(task, start));
            occupied.push(TimeWindow::new(start, end));
            scheduled_minutes += task.estimated_minutes;
            placed = true;
            break;
        }

        if !placed {
            conflicts.push(format!(
                "Could not schedule \"{}\" - no suitable time slot found",
                task.title
            ));
            if let Some(r) = recommender {
                if let Some(text) = r.recommend(task, profile) {
                    recommendations.push(text);
                }
            }
        }
    }

    let energy_optimization = EnergyOptimization::tally(&blocks);

    ScheduleResult {
        time_blocks: blocks,
        total_scheduled_minutes: scheduled_minutes,
        total_available_minutes: available_minutes,
        conflicts,
        recommendations,
        energy_optimization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyLevel;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;

    fn profile() -> EnergyProfile {
        EnergyProfile {
            morning: 8,
            afternoon: 4,
            evening: 6,
            night: 2,
        }
    }

    fn window(h0: u32, h1: u32) -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2026, 3, 2, h0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, h1, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_high_energy_task_lands_in_morning_window() {
        let task = Task::new("t1", "problem set")
            .with_minutes(60)
            .with_priority(5)
            .with_energy(EnergyLevel::High);

        let result = build_schedule(
            &[task],
            &profile(),
            &[window(6, 10), window(12, 14)],
            &[],
            None,
        );

        assert!(result.conflicts.is_empty());
        assert_eq!(result.time_blocks.len(), 1);
        let b = &result.time_blocks[0];
        assert_eq!(b.start_time, Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap());
        assert_eq!(b.end_time, Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap());
        assert_eq!(result.total_scheduled_minutes, 60);
        assert_eq!(result.total_available_minutes, 240 + 120);
        assert_eq!(result.energy_optimization.morning_tasks, 1);
    }

    #[test]
    fn test_low_scoring_windows_are_refused() {
        // Only an afternoon window; its energy (4) is outside the high band,
        // so it scores 0, under the floor.
        let task = Task::new("t1", "exam prep")
            .with_minutes(45)
            .with_energy(EnergyLevel::High);

        let result = build_schedule(&[task], &profile(), &[window(12, 16)], &[], None);

        assert!(result.time_blocks.is_empty());
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.conflicts[0].contains("no suitable time slot found"));
    }

    #[test]
    fn test_no_two_blocks_overlap() {
        // Three tasks over staggered, mutually overlapping morning windows.
        let tasks: Vec<Task> = (1..=3)
            .map(|i| {
                Task::new(format!("t{i}"), format!("task {i}"))
                    .with_minutes(90)
                    .with_energy(EnergyLevel::High)
            })
            .collect();

        let result = build_schedule(
            &tasks,
            &profile(),
            &[window(6, 10), window(7, 10), window(8, 10)],
            &[],
            None,
        );

        assert_eq!(result.time_blocks.len(), 2);
        assert_eq!(result.conflicts.len(), 1);
        for (i, a) in result.time_blocks.iter().enumerate() {
            for b in &result.time_blocks[i + 1..] {
                assert!(
                    a.end_time <= b.start_time || b.end_time <= a.start_time,
                    "blocks {} and {} overlap",
                    a.task_id,
                    b.task_id
                );
            }
        }
    }

    #[test]
    fn test_blocks_avoid_existing_events() {
        let task = Task::new("t1", "reading")
            .with_minutes(60)
            .with_energy(EnergyLevel::High);
        // Event sits on the front of the only acceptable window.
        let event = window(6, 8);

        let result = build_schedule(&[task], &profile(), &[window(6, 10)], &[event], None);

        // Greedy anchors at the window start only, so the event forces a conflict.
        assert!(result.time_blocks.is_empty());
        assert_eq!(result.conflicts.len(), 1);
    }

    #[test]
    fn test_second_task_cannot_reuse_full_window() {
        // 60-minute window, two 60-minute tasks: second must conflict.
        let t1 = Task::new("t1", "first")
            .with_minutes(60)
            .with_priority(5)
            .with_energy(EnergyLevel::High);
        let t2 = Task::new("t2", "second")
            .with_minutes(60)
            .with_priority(4)
            .with_energy(EnergyLevel::High);

        let result = build_schedule(&[t1, t2], &profile(), &[window(6, 7)], &[], None);

        assert_eq!(result.time_blocks.len(), 1);
        assert_eq!(result.time_blocks[0].task_id, "t1");
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.conflicts[0].contains("second"));
    }

    #[test]
    fn test_conservation_every_task_is_block_or_conflict() {
        let tasks = vec![
            Task::new("a", "fits").with_minutes(60).with_energy(EnergyLevel::High),
            Task::new("b", "too long").with_minutes(600).with_energy(EnergyLevel::High),
            Task::new("c", "blocked")
                .with_dependencies(vec!["ghost".to_string()]),
        ];

        let result = build_schedule(&tasks, &profile(), &[window(6, 10)], &[], None);

        assert_eq!(
            result.time_blocks.len() + result.conflicts.len(),
            tasks.len()
        );
        let placed: Vec<&str> = result.time_blocks.iter().map(|b| b.task_id.as_str()).collect();
        assert_eq!(placed, vec!["a"]);
    }

    #[test]
    fn test_unmet_dependency_always_conflicts() {
        let task = Task::new("t1", "write conclusion")
            .with_dependencies(vec!["never-placed".to_string()]);

        let result = build_schedule(&[task], &profile(), &[window(6, 10)], &[], None);

        assert!(result.time_blocks.is_empty());
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.conflicts[0].contains("depends on unscheduled tasks"));
    }

    #[test]
    fn test_satisfied_dependency_places_after_parent() {
        let parent = Task::new("p", "outline")
            .with_minutes(30)
            .with_priority(5)
            .with_energy(EnergyLevel::High);
        let child = Task::new("c", "draft")
            .with_minutes(30)
            .with_priority(4)
            .with_energy(EnergyLevel::High)
            .with_dependencies(vec!["p".to_string()]);

        // Two morning windows: placement anchors at window starts, so the
        // child needs its own window once the parent takes the first.
        let result = build_schedule(
            &[child, parent],
            &profile(),
            &[window(6, 8), window(8, 10)],
            &[],
            None,
        );

        assert_eq!(result.time_blocks.len(), 2);
        assert!(result.conflicts.is_empty());
        assert_eq!(result.time_blocks[0].task_id, "p");
        assert_eq!(result.time_blocks[1].task_id, "c");
    }

    #[test]
    fn test_dependent_prioritized_ahead_of_parent_is_not_retried() {
        // The child carries a deadline, so the prioritizer puts it first even
        // though its parent hasn't been placed yet. It must conflict once and
        // never be revisited after the parent lands.
        let parent = Task::new("p", "collect data")
            .with_minutes(30)
            .with_energy(EnergyLevel::High);
        let child = Task::new("c", "submit analysis")
            .with_minutes(30)
            .with_energy(EnergyLevel::High)
            .with_deadline(Utc.with_ymd_and_hms(2026, 3, 2, 20, 0, 0).unwrap())
            .with_dependencies(vec!["p".to_string()]);

        let result = build_schedule(&[parent, child], &profile(), &[window(6, 10)], &[], None);

        assert_eq!(result.time_blocks.len(), 1);
        assert_eq!(result.time_blocks[0].task_id, "p");
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.conflicts[0].contains("submit analysis"));
    }

    struct CannedRecommender {
        calls: RefCell<usize>,
    }

    impl Recommender for CannedRecommender {
        fn recommend(&self, task: &Task, _profile: &EnergyProfile) -> Option<String> {
            *self.calls.borrow_mut() += 1;
            Some(format!("Try splitting \"{}\" into smaller sessions.", task.title))
        }
    }

    struct SilentRecommender;

    impl Recommender for SilentRecommender {
        fn recommend(&self, _task: &Task, _profile: &EnergyProfile) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_recommender_called_only_for_unplaceable_tasks() {
        let ok = Task::new("ok", "fits")
            .with_minutes(30)
            .with_priority(5)
            .with_energy(EnergyLevel::High);
        let stuck = Task::new("stuck", "nowhere to go")
            .with_minutes(30)
            .with_energy(EnergyLevel::Low);

        let rec = CannedRecommender {
            calls: RefCell::new(0),
        };
        let result = build_schedule(
            &[ok, stuck],
            &profile(),
            // Morning only: great for high, out of band for low.
            &[window(6, 10)],
            &[],
            Some(&rec),
        );

        assert_eq!(*rec.calls.borrow(), 1);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].contains("nowhere to go"));
    }

    #[test]
    fn test_recommender_returning_none_adds_nothing() {
        let stuck = Task::new("stuck", "unplaceable").with_energy(EnergyLevel::Low);
        let result = build_schedule(
            &[stuck],
            &profile(),
            &[window(6, 10)],
            &[],
            Some(&SilentRecommender),
        );
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_duration_fidelity() {
        let tasks = vec![
            Task::new("a", "a").with_minutes(25).with_energy(EnergyLevel::High),
            Task::new("b", "b").with_minutes(110).with_energy(EnergyLevel::High),
        ];
        let result = build_schedule(&tasks, &profile(), &[window(6, 12)], &[], None);
        for b in &result.time_blocks {
            assert_eq!(
                (b.end_time - b.start_time).num_minutes(),
                b.estimated_minutes
            );
        }
    }

    #[test]
    fn test_unrepresentable_duration_conflicts_instead_of_panicking() {
        // Built directly, skipping the validation layer: placement itself
        // must stay panic-free and answer with a conflict.
        let absurd = Task::new("t1", "endless")
            .with_minutes(i64::MAX)
            .with_energy(EnergyLevel::High);

        let result = build_schedule(&[absurd], &profile(), &[window(6, 10)], &[], None);

        assert!(result.time_blocks.is_empty());
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.conflicts[0].contains("no suitable time slot found"));
    }

    #[test]
    fn test_empty_inputs_yield_empty_result() {
        let result = build_schedule(&[], &profile(), &[], &[], None);
        assert!(result.time_blocks.is_empty());
        assert!(result.conflicts.is_empty());
        assert_eq!(result.total_available_minutes, 0);
    }
}
