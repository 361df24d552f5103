//! mentark-core: energy-aware task-to-timeslot scheduling engine.
//!
//! Pure, per-call computation: callers hand in tasks, an energy profile,
//! available windows and existing events; they get back placed blocks plus
//! a readable reason for every task that couldn't be placed. Nothing is
//! persisted between calls.

pub mod analyzer;
pub mod energy;
pub mod placer;
pub mod prioritize;
pub mod schedule;
pub mod slots;
pub mod task;
pub mod time;

pub use analyzer::{
    analyze_schedule, free_windows, optimize_schedule, OptimizedSchedule, ScheduleAnalysis,
    ScheduleGap,
};
pub use energy::{DayBucket, EnergyBand, EnergyLevel, EnergyProfile};
pub use placer::{build_schedule, Recommender, MIN_PLACEMENT_SCORE};
pub use prioritize::prioritize;
pub use schedule::{EnergyOptimization, ScheduleResult, TimeBlock};
pub use slots::{score_windows, ScoredWindow, TimeWindow};
pub use task::Task;
