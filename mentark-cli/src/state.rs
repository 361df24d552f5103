use anyhow::{Context, Result};
use mentark_core::{EnergyProfile, TimeBlock};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub fn mentark_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".mentark"))
}

pub fn ensure_mentark_home() -> Result<PathBuf> {
    let dir = mentark_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub created_at_utc: Option<String>,
    /// Identifier sent with recommendation requests.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub energy: EnergyProfile,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            created_at_utc: None,
            user_id: None,
            timezone: default_timezone(),
            energy: EnergyProfile::default(),
        }
    }
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

pub fn profile_path() -> Result<PathBuf> {
    Ok(ensure_mentark_home()?.join("profile.json"))
}

pub fn write_profile(profile: &Profile) -> Result<()> {
    let p = profile_path()?;
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn read_profile() -> Result<Profile> {
    let p = profile_path()?;
    if !p.exists() {
        return Ok(Profile::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn last_schedule_path() -> Result<PathBuf> {
    Ok(ensure_mentark_home()?.join("last_schedule.json"))
}

/// Keep the most recent placement around so `optimize` has a default input.
pub fn write_last_schedule(blocks: &[TimeBlock]) -> Result<()> {
    let p = last_schedule_path()?;
    let json = serde_json::to_string_pretty(blocks)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn read_last_schedule() -> Result<Vec<TimeBlock>> {
    let p = last_schedule_path()?;
    if !p.exists() {
        anyhow::bail!("no saved schedule at {} (run: mentark schedule)", p.display());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}
