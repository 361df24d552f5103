//! Task prioritizer: total order over the incoming task list.

use std::cmp::Ordering;

use crate::task::Task;

/// Order tasks for placement. Stable for tied keys.
///
/// Key chain:
/// 1. has a deadline before no deadline
/// 2. earlier deadline first
/// 3. higher priority first
/// 4. dependency-free before dependent (checks emptiness only, not whether
///    the dependencies are satisfied; the placer gates on that at runtime)
/// 5. shorter duration first (packs better)
pub fn prioritize(tasks: &[Task]) -> Vec<Task> {
    let mut out = tasks.to_vec();
    out.sort_by(compare);
    out
}

fn compare(a: &Task, b: &Task) -> Ordering {
    match (a.deadline, b.deadline) {
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (Some(da), Some(db)) => {
            let ord = da.cmp(&db);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        (None, None) => {}
    }

    b.priority
        .cmp(&a.priority)
        .then_with(|| a.dependencies.is_empty().cmp(&b.dependencies.is_empty()).reverse())
        .then_with(|| a.estimated_minutes.cmp(&b.estimated_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_deadline_beats_no_deadline() {
        let due = Task::new("a", "due")
            .with_priority(1)
            .with_deadline(Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap());
        let free = Task::new("b", "free").with_priority(5);

        let ordered = prioritize(&[free, due]);
        assert_eq!(ordered[0].id, "a");
    }

    #[test]
    fn test_earlier_deadline_first() {
        let d1 = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2026, 3, 6, 9, 0, 0).unwrap();
        let later = Task::new("later", "later").with_deadline(d2).with_priority(5);
        let sooner = Task::new("sooner", "sooner").with_deadline(d1).with_priority(1);

        let ordered = prioritize(&[later, sooner]);
        assert_eq!(ordered[0].id, "sooner");
        assert_eq!(ordered[1].id, "later");
    }

    #[test]
    fn test_priority_breaks_deadline_tie() {
        let d = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let low = Task::new("low", "low").with_deadline(d).with_priority(2);
        let high = Task::new("high", "high").with_deadline(d).with_priority(4);

        let ordered = prioritize(&[low, high]);
        assert_eq!(ordered[0].id, "high");
    }

    #[test]
    fn test_dependency_free_first_regardless_of_satisfaction() {
        // The tie-break only looks at list emptiness. A task depending on an
        // id that will never exist still sorts after a dependency-free peer,
        // nothing more.
        let dependent =
            Task::new("dep", "dependent").with_dependencies(vec!["ghost".to_string()]);
        let free = Task::new("free", "independent");

        let ordered = prioritize(&[dependent.clone(), free]);
        assert_eq!(ordered[0].id, "free");
        assert_eq!(ordered[1].id, "dep");
    }

    #[test]
    fn test_shorter_task_first_on_full_tie() {
        let long = Task::new("long", "long").with_minutes(120);
        let short = Task::new("short", "short").with_minutes(25);

        let ordered = prioritize(&[long, short]);
        assert_eq!(ordered[0].id, "short");
    }

    #[test]
    fn test_stable_for_fully_tied_tasks() {
        let a = Task::new("a", "first in");
        let b = Task::new("b", "second in");
        let ordered = prioritize(&[a, b]);
        assert_eq!(ordered[0].id, "a");
        assert_eq!(ordered[1].id, "b");
    }

    #[test]
    fn test_empty_input() {
        assert!(prioritize(&[]).is_empty());
    }
}
