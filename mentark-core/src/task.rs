//! Task model for the scheduling engine.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::EnergyLevel;

/// Upper bound on a task estimate: one full day. Anything longer cannot fit
/// a daily window and usually signals bad input.
pub const MAX_TASK_MINUTES: i64 = 24 * 60;

/// A unit of work waiting for a calendar slot.
///
/// Kept small + serializable; storage is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Minutes. Must be positive; see [`Task::validate`].
    pub estimated_minutes: i64,

    /// 1-5, 5 being the most urgent.
    pub priority: u8,

    pub energy_required: EnergyLevel,

    /// Free-text label, reporting only.
    #[serde(default)]
    pub category: String,

    /// Ids of tasks that must already be on the schedule first.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Optional hard deadline (UTC). Tasks with one are scheduled first.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,

    /// Reserved: placement does not consult this yet.
    #[serde(default = "default_flexible")]
    pub flexible: bool,
}

fn default_flexible() -> bool {
    true
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            estimated_minutes: 30,
            priority: 3,
            energy_required: EnergyLevel::Medium,
            category: "general".to_string(),
            dependencies: Vec::new(),
            deadline: None,
            flexible: true,
        }
    }

    pub fn with_minutes(mut self, minutes: i64) -> Self {
        self.estimated_minutes = minutes;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy_required = energy;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dependencies(mut self, deps: Vec<String>) -> Self {
        self.dependencies = deps;
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Input validation for the ingestion/route layer. The scheduler itself
    /// assumes tasks are already well-formed.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("task has an empty id");
        }
        if self.estimated_minutes <= 0 {
            bail!(
                "task \"{}\": estimated_minutes must be positive, got {}",
                self.title,
                self.estimated_minutes
            );
        }
        if self.estimated_minutes > MAX_TASK_MINUTES {
            bail!(
                "task \"{}\": estimated_minutes must be at most {MAX_TASK_MINUTES}, got {}",
                self.title,
                self.estimated_minutes
            );
        }
        if !(1..=5).contains(&self.priority) {
            bail!(
                "task \"{}\": priority must be 1-5, got {}",
                self.title,
                self.priority
            );
        }
        Ok(())
    }
}
