//! Post-hoc schedule quality analysis and re-derivation ("optimize").

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::{EnergyLevel, EnergyProfile};
use crate::placer::{build_schedule, Recommender};
use crate::schedule::TimeBlock;
use crate::slots::TimeWindow;
use crate::task::Task;

/// Gaps longer than this are worth flagging.
const LONG_GAP_MINUTES: i64 = 60;

/// An idle stretch between two consecutive blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGap {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub minutes: i64,
}

/// Findings of one analysis pass. Pure data; computing it twice on the same
/// inputs yields the same findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAnalysis {
    /// Titles of blocks sitting in a bucket below their required-energy floor.
    pub poor_energy_matches: Vec<String>,
    /// Idle stretches longer than an hour.
    pub long_gaps: Vec<ScheduleGap>,
    /// Count of adjacent pairs where both blocks demand high energy.
    pub back_to_back_high_energy: usize,
}

/// Read-only quality pass over an existing schedule.
pub fn analyze_schedule(schedule: &[TimeBlock], profile: &EnergyProfile) -> ScheduleAnalysis {
    let mut sorted = schedule.to_vec();
    sorted.sort_by_key(|b| b.start_time);

    let mut analysis = ScheduleAnalysis::default();

    for (i, block) in sorted.iter().enumerate() {
        let energy_here = profile.at_hour(block.start_time.hour());
        if energy_here < block.energy_level.floor() {
            analysis.poor_energy_matches.push(block.task_title.clone());
        }

        if let Some(next) = sorted.get(i + 1) {
            let gap = (next.start_time - block.end_time).num_minutes();
            if gap > LONG_GAP_MINUTES {
                analysis.long_gaps.push(ScheduleGap {
                    start: block.end_time,
                    end: next.start_time,
                    minutes: gap,
                });
            }
        }

        if block.energy_level == EnergyLevel::High
            && i > 0
            && sorted[i - 1].energy_level == EnergyLevel::High
        {
            analysis.back_to_back_high_energy += 1;
        }
    }

    analysis
}

/// Free intervals between consecutive blocks of an existing schedule,
/// within its overall span. Used to reclaim windows for re-derivation.
pub fn free_windows(schedule: &[TimeBlock]) -> Vec<TimeWindow> {
    let mut sorted = schedule.to_vec();
    sorted.sort_by_key(|b| b.start_time);

    let mut out = Vec::new();
    for pair in sorted.windows(2) {
        if pair[1].start_time > pair[0].end_time {
            out.push(TimeWindow::new(pair[0].end_time, pair[1].start_time));
        }
    }
    out
}

/// Result of [`optimize_schedule`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizedSchedule {
    pub optimized: Vec<TimeBlock>,
    pub improvements: Vec<String>,
}

/// Re-derive a schedule from scratch and report what was wrong with the old
/// one. Optimization never patches the current schedule in place.
pub fn optimize_schedule(
    current: &[TimeBlock],
    tasks: &[Task],
    profile: &EnergyProfile,
    recommender: Option<&dyn Recommender>,
) -> OptimizedSchedule {
    let analysis = analyze_schedule(current, profile);

    let mut improvements = Vec::new();
    if !analysis.poor_energy_matches.is_empty() {
        improvements.push(format!(
            "Found {} tasks scheduled during low-energy periods. Consider rescheduling.",
            analysis.poor_energy_matches.len()
        ));
    }
    if !analysis.long_gaps.is_empty() {
        improvements.push(format!(
            "Found {} long gaps in schedule. Consider adding short tasks or breaks.",
            analysis.long_gaps.len()
        ));
    }
    if analysis.back_to_back_high_energy > 3 {
        improvements.push(
            "Multiple high-energy tasks scheduled back-to-back. Consider adding breaks to prevent burnout."
                .to_string(),
        );
    }

    let windows = free_windows(current);
    let rebuilt = build_schedule(tasks, profile, &windows, &[], recommender);

    OptimizedSchedule {
        optimized: rebuilt.time_blocks,
        improvements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile() -> EnergyProfile {
        EnergyProfile {
            morning: 8,
            afternoon: 4,
            evening: 6,
            night: 2,
        }
    }

    fn block(h0: u32, m0: u32, minutes: i64, energy: EnergyLevel, title: &str) -> TimeBlock {
        let task = Task::new(title, title).with_minutes(minutes).with_energy(energy);
        TimeBlock::for_task(
            &task,
            Utc.with_ymd_and_hms(2026, 3, 2, h0, m0, 0).unwrap(),
        )
    }

    #[test]
    fn test_flags_block_below_energy_floor() {
        // High-energy work at 13:00 when afternoon energy is 4 (< floor 8).
        let schedule = vec![block(13, 0, 60, EnergyLevel::High, "thesis writing")];
        let analysis = analyze_schedule(&schedule, &profile());
        assert_eq!(analysis.poor_energy_matches, vec!["thesis writing"]);
    }

    #[test]
    fn test_well_placed_block_not_flagged() {
        let schedule = vec![block(7, 0, 60, EnergyLevel::High, "thesis writing")];
        let analysis = analyze_schedule(&schedule, &profile());
        assert!(analysis.poor_energy_matches.is_empty());
    }

    #[test]
    fn test_flags_gap_over_an_hour() {
        let schedule = vec![
            block(7, 0, 60, EnergyLevel::Medium, "a"),
            block(10, 0, 30, EnergyLevel::Medium, "b"),
        ];
        let analysis = analyze_schedule(&schedule, &profile());
        assert_eq!(analysis.long_gaps.len(), 1);
        assert_eq!(analysis.long_gaps[0].minutes, 120);
    }

    #[test]
    fn test_exact_hour_gap_not_flagged() {
        let schedule = vec![
            block(7, 0, 60, EnergyLevel::Medium, "a"),
            block(9, 0, 30, EnergyLevel::Medium, "b"),
        ];
        let analysis = analyze_schedule(&schedule, &profile());
        assert!(analysis.long_gaps.is_empty());
    }

    #[test]
    fn test_counts_back_to_back_high_energy_pairs() {
        let schedule = vec![
            block(6, 0, 60, EnergyLevel::High, "a"),
            block(7, 0, 60, EnergyLevel::High, "b"),
            block(8, 0, 60, EnergyLevel::High, "c"),
            block(9, 0, 60, EnergyLevel::Low, "d"),
        ];
        let analysis = analyze_schedule(&schedule, &profile());
        assert_eq!(analysis.back_to_back_high_energy, 2);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let schedule = vec![
            block(13, 0, 60, EnergyLevel::High, "a"),
            block(16, 0, 30, EnergyLevel::Low, "b"),
        ];
        let first = analyze_schedule(&schedule, &profile());
        let second = analyze_schedule(&schedule, &profile());
        assert_eq!(first, second);
    }

    #[test]
    fn test_analysis_ignores_input_order() {
        let a = block(13, 0, 60, EnergyLevel::High, "a");
        let b = block(16, 0, 30, EnergyLevel::Low, "b");
        let fwd = analyze_schedule(&[a.clone(), b.clone()], &profile());
        let rev = analyze_schedule(&[b, a], &profile());
        assert_eq!(fwd, rev);
    }

    #[test]
    fn test_free_windows_are_the_gaps() {
        let schedule = vec![
            block(7, 0, 60, EnergyLevel::Medium, "a"),
            block(10, 0, 30, EnergyLevel::Medium, "b"),
        ];
        let windows = free_windows(&schedule);
        assert_eq!(windows.len(), 1);
        assert_eq!(
            windows[0].start,
            Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
        );
        assert_eq!(
            windows[0].end,
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_optimize_rederives_into_freed_gaps() {
        // Current schedule leaves a 08:00-11:00 morning gap.
        let current = vec![
            block(7, 0, 60, EnergyLevel::Medium, "existing a"),
            block(11, 0, 60, EnergyLevel::Medium, "existing b"),
        ];
        let tasks = vec![
            Task::new("n1", "new work")
                .with_minutes(60)
                .with_energy(EnergyLevel::High),
        ];

        let result = optimize_schedule(&current, &tasks, &profile(), None);

        assert_eq!(result.optimized.len(), 1);
        assert_eq!(
            result.optimized[0].start_time,
            Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
        );
        // One gap over an hour was flagged.
        assert_eq!(result.improvements.len(), 1);
        assert!(result.improvements[0].contains("long gaps"));
    }
}
