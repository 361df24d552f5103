use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_mentark_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmSection,
    pub recommend: RecommendSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSection {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendSection {
    /// Ask the LLM for advice on unplaceable tasks.
    pub enabled: bool,
    /// Seconds before a recommendation request is abandoned.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmSection {
                provider: "anthropic".to_string(),
                model: "claude-3-5-sonnet-latest".to_string(),
                temperature: 0.4,
            },
            recommend: RecommendSection {
                enabled: true,
                timeout_secs: 20,
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_mentark_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote default config: {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("{}", toml::to_string_pretty(&cfg)?);
    Ok(())
}
