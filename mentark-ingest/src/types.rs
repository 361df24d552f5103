//! Plan-file types: one JSON document describing a whole scheduling request.

use anyhow::{bail, Context, Result};
use mentark_core::{EnergyProfile, Task, TimeWindow};
use serde::{Deserialize, Serialize};

/// Everything one scheduling run needs, as loaded from disk.
///
/// Times are RFC3339; local wall-clock input is the CLI's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    /// Inline profile; falls back to the stored user profile when absent.
    #[serde(default)]
    pub energy_profile: Option<EnergyProfile>,

    pub tasks: Vec<Task>,

    #[serde(default)]
    pub available_windows: Vec<TimeWindow>,

    #[serde(default)]
    pub existing_events: Vec<TimeWindow>,
}

impl PlanFile {
    /// Reject malformed input before it reaches the scheduler, which
    /// assumes well-formed data.
    pub fn validate(&self) -> Result<()> {
        for task in &self.tasks {
            task.validate()?;
        }
        if let Some(profile) = &self.energy_profile {
            profile.validate()?;
        }
        for w in self.available_windows.iter().chain(&self.existing_events) {
            if w.end <= w.start {
                bail!(
                    "window ends before it starts: {} .. {}",
                    w.start.to_rfc3339(),
                    w.end.to_rfc3339()
                );
            }
        }

        let mut seen = std::collections::HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.as_str()) {
                bail!("duplicate task id: {}", task.id);
            }
        }
        Ok(())
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let plan: PlanFile = serde_json::from_str(s).context("parse plan JSON")?;
        plan.validate()?;
        Ok(plan)
    }
}
