//! Output types of a scheduling run: placed blocks and the run summary.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::{DayBucket, EnergyLevel};
use crate::task::Task;

/// A placed task: concrete start/end on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub task_id: String,
    pub task_title: String,
    pub energy_level: EnergyLevel,
    pub category: String,
    pub estimated_minutes: i64,
}

impl TimeBlock {
    /// Build a block for `task` anchored at `start`.
    pub fn for_task(task: &Task, start: DateTime<Utc>) -> Self {
        Self {
            start_time: start,
            end_time: start + chrono::Duration::minutes(task.estimated_minutes),
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            energy_level: task.energy_required,
            category: task.category.clone(),
            estimated_minutes: task.estimated_minutes,
        }
    }

    /// Day bucket of the block, keyed on its start hour.
    pub fn bucket(&self) -> DayBucket {
        DayBucket::from_hour(self.start_time.hour())
    }
}

/// How many placed blocks start in each day bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyOptimization {
    pub morning_tasks: usize,
    pub afternoon_tasks: usize,
    pub evening_tasks: usize,
    pub night_tasks: usize,
}

impl EnergyOptimization {
    pub fn record(&mut self, bucket: DayBucket) {
        match bucket {
            DayBucket::Morning => self.morning_tasks += 1,
            DayBucket::Afternoon => self.afternoon_tasks += 1,
            DayBucket::Evening => self.evening_tasks += 1,
            DayBucket::Night => self.night_tasks += 1,
        }
    }

    pub fn tally(blocks: &[TimeBlock]) -> Self {
        let mut out = Self::default();
        for b in blocks {
            out.record(b.bucket());
        }
        out
    }
}

/// Aggregate result of one scheduling run.
///
/// Every input task shows up exactly once: as one block or one conflict line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub time_blocks: Vec<TimeBlock>,
    pub total_scheduled_minutes: i64,
    /// Gross sum of window lengths, not net of anything.
    pub total_available_minutes: i64,
    pub conflicts: Vec<String>,
    pub recommendations: Vec<String>,
    pub energy_optimization: EnergyOptimization,
}
