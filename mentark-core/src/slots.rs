//! Time windows and energy-fit scoring of candidate slots.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::{EnergyLevel, EnergyProfile};

/// An available interval supplied by the caller. Windows may overlap;
/// the scheduler never merges them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Gross length in minutes (zero if degenerate).
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }
}

/// A candidate window annotated with its energy-fit score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredWindow {
    pub window: TimeWindow,
    pub score: f64,
}

/// Score every window against a task's energy requirement and return them
/// sorted best-first.
///
/// A window whose bucket energy falls inside the target band scores
/// `10 - |energy - band midpoint|`; anything outside the band scores 0.
/// Zero-score windows are kept (the placer applies its own floor).
pub fn score_windows(
    profile: &EnergyProfile,
    required: EnergyLevel,
    windows: &[TimeWindow],
) -> Vec<ScoredWindow> {
    let band = required.target_band();

    let mut scored: Vec<ScoredWindow> = windows
        .iter()
        .map(|w| {
            let energy = profile.at_hour(w.start.hour());
            let score = if band.contains(energy) {
                10.0 - (energy as f64 - band.midpoint()).abs()
            } else {
                0.0
            };
            ScoredWindow { window: *w, score }
        })
        .collect();

    // Stable: equal scores keep caller order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
