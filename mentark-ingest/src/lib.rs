//! mentark-ingest: scheduling-request ingestion (plan JSON, task CSV) with
//! the input validation the core scheduler assumes has already happened.

pub mod parsers;
pub mod types;

pub use parsers::parse_tasks_csv;
pub use types::PlanFile;

use anyhow::{Context, Result};
use std::path::Path;

/// Load and validate a plan file from disk.
pub fn load_plan(path: impl AsRef<Path>) -> Result<PlanFile> {
    let s = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read {}", path.as_ref().display()))?;
    PlanFile::from_json(&s)
}
