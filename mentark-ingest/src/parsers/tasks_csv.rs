//! Task-list CSV parser (spreadsheet exports).
//!
//! Expected header:
//!   id,title,minutes,priority,energy,category,deadline,dependencies
//!
//! `deadline` is RFC3339 or empty; `dependencies` is a semicolon-separated
//! id list or empty.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use mentark_core::{EnergyLevel, Task};
use std::path::Path;

pub fn parse_tasks_csv(path: impl AsRef<Path>) -> Result<Vec<Task>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let mut tasks = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let line = row + 2; // 1-based, after the header

        let task = parse_record(&record)
            .with_context(|| format!("{} line {line}", path.as_ref().display()))?;
        task.validate()
            .with_context(|| format!("{} line {line}", path.as_ref().display()))?;
        tasks.push(task);
    }
    Ok(tasks)
}

fn parse_record(record: &csv::StringRecord) -> Result<Task> {
    let field = |i: usize| record.get(i).unwrap_or("").trim();

    let id = field(0);
    let title = field(1);
    if id.is_empty() || title.is_empty() {
        bail!("id and title are required");
    }

    let minutes: i64 = field(2)
        .parse()
        .with_context(|| format!("bad minutes '{}'", field(2)))?;
    let priority: u8 = field(3)
        .parse()
        .with_context(|| format!("bad priority '{}'", field(3)))?;
    let energy = parse_energy(field(4))?;

    let mut task = Task::new(id, title)
        .with_minutes(minutes)
        .with_priority(priority)
        .with_energy(energy);

    if !field(5).is_empty() {
        task = task.with_category(field(5));
    }

    if !field(6).is_empty() {
        let deadline: DateTime<Utc> = field(6)
            .parse()
            .with_context(|| format!("bad deadline '{}'", field(6)))?;
        task = task.with_deadline(deadline);
    }

    if !field(7).is_empty() {
        let deps = field(7)
            .split(';')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        task = task.with_dependencies(deps);
    }

    Ok(task)
}

fn parse_energy(s: &str) -> Result<EnergyLevel> {
    match s.to_lowercase().as_str() {
        "low" => Ok(EnergyLevel::Low),
        "medium" => Ok(EnergyLevel::Medium),
        "high" => Ok(EnergyLevel::High),
        other => bail!("energy must be low/medium/high, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir();
        let path = dir.join(format!(
            "mentark-tasks-{}-{}.csv",
            std::process::id(),
            contents.len()
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_full_row() {
        let path = write_temp(
            "id,title,minutes,priority,energy,category,deadline,dependencies\n\
             t1,essay draft,90,4,high,writing,2026-03-09T17:00:00Z,t0;t2\n",
        );
        let tasks = parse_tasks_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(tasks.len(), 1);
        let t = &tasks[0];
        assert_eq!(t.id, "t1");
        assert_eq!(t.estimated_minutes, 90);
        assert_eq!(t.priority, 4);
        assert_eq!(t.energy_required, EnergyLevel::High);
        assert_eq!(t.category, "writing");
        assert!(t.deadline.is_some());
        assert_eq!(t.dependencies, vec!["t0", "t2"]);
    }

    #[test]
    fn test_parse_minimal_row() {
        let path = write_temp(
            "id,title,minutes,priority,energy,category,deadline,dependencies\n\
             t1,quick review,25,2,low,,,\n",
        );
        let tasks = parse_tasks_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let t = &tasks[0];
        assert_eq!(t.category, "general");
        assert!(t.deadline.is_none());
        assert!(t.dependencies.is_empty());
    }

    #[test]
    fn test_bad_energy_is_an_error() {
        let path = write_temp(
            "id,title,minutes,priority,energy,category,deadline,dependencies\n\
             t1,x,30,3,extreme,,,\n",
        );
        let err = parse_tasks_csv(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_invalid_minutes_rejected_by_validation() {
        let path = write_temp(
            "id,title,minutes,priority,energy,category,deadline,dependencies\n\
             t1,x,-5,3,low,,,\n",
        );
        assert!(parse_tasks_csv(&path).is_err());
        std::fs::remove_file(&path).ok();
    }
}
