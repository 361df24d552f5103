//! Energy model: day buckets and the per-user 1-10 energy profile.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// How much energy a task demands from the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    /// Profile band this level wants to land in.
    pub fn target_band(self) -> EnergyBand {
        match self {
            EnergyLevel::Low => EnergyBand { min: 1, max: 4 },
            EnergyLevel::Medium => EnergyBand { min: 5, max: 7 },
            EnergyLevel::High => EnergyBand { min: 8, max: 10 },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }

    /// Minimum profile energy below which a placement counts as a poor match.
    pub fn floor(self) -> u8 {
        match self {
            EnergyLevel::Low => 3,
            EnergyLevel::Medium => 5,
            EnergyLevel::High => 8,
        }
    }
}

/// Inclusive 1-10 range on the energy scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyBand {
    pub min: u8,
    pub max: u8,
}

impl EnergyBand {
    pub fn contains(&self, energy: u8) -> bool {
        energy >= self.min && energy <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }
}

/// One of the four fixed segments of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBucket {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayBucket {
    /// Bucket for an hour-of-day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..12 => DayBucket::Morning,
            12..17 => DayBucket::Afternoon,
            17..22 => DayBucket::Evening,
            _ => DayBucket::Night,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayBucket::Morning => "morning",
            DayBucket::Afternoon => "afternoon",
            DayBucket::Evening => "evening",
            DayBucket::Night => "night",
        }
    }
}

/// Per-user energy scores, one per day bucket, each 1-10.
///
/// Request-scoped: callers pass this in, nothing is persisted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyProfile {
    pub morning: u8,
    pub afternoon: u8,
    pub evening: u8,
    pub night: u8,
}

impl EnergyProfile {
    pub fn level_at(&self, bucket: DayBucket) -> u8 {
        match bucket {
            DayBucket::Morning => self.morning,
            DayBucket::Afternoon => self.afternoon,
            DayBucket::Evening => self.evening,
            DayBucket::Night => self.night,
        }
    }

    pub fn at_hour(&self, hour: u32) -> u8 {
        self.level_at(DayBucket::from_hour(hour))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("morning", self.morning),
            ("afternoon", self.afternoon),
            ("evening", self.evening),
            ("night", self.night),
        ] {
            if !(1..=10).contains(&v) {
                bail!("energy profile {name} must be 1-10, got {v}");
            }
        }
        Ok(())
    }
}

impl Default for EnergyProfile {
    fn default() -> Self {
        // Neutral mid-scale profile until the student tunes theirs.
        Self {
            morning: 7,
            afternoon: 5,
            evening: 6,
            night: 3,
        }
    }
}
