use crate::domain::{id::TaskId, task::Task};
use crate::error::TaskflowError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::{fmt, str::FromStr};

/// Orderings a column can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// High before medium before low
    Priority,
    /// Newest `created_at` first
    Date,
}

impl FromStr for SortType {
    type Err = TaskflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priority" => Ok(SortType::Priority),
            "date" => Ok(SortType::Date),
            _ => Err(TaskflowError::InvalidSortType(s.to_string())),
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priority => write!(f, "priority"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// Sorts a column's task sequence in place
///
/// The sort is stable: tasks that compare equal keep their relative order.
/// Ids with no entry in `tasks` sort after every known task.
///
/// # Examples
/// ```
/// use indexmap::IndexMap;
/// use taskflow_core::domain::sorting::{sort_task_ids, SortType};
/// use taskflow_core::domain::{Priority, Task, TaskId};
///
/// let mut tasks = IndexMap::new();
/// for (id, priority) in [("a", Priority::Low), ("b", Priority::High)] {
///     let mut task = Task::new(id, "", priority);
///     task.id = TaskId::from(id);
///     tasks.insert(task.id.clone(), task);
/// }
///
/// let mut ids = vec![TaskId::from("a"), TaskId::from("b")];
/// sort_task_ids(&mut ids, &tasks, SortType::Priority);
/// assert_eq!(ids[0].as_str(), "b");
/// ```
pub fn sort_task_ids(ids: &mut [TaskId], tasks: &IndexMap<TaskId, Task>, sort_type: SortType) {
    ids.sort_by(|a, b| match (tasks.get(a), tasks.get(b)) {
        (Some(a), Some(b)) => compare_tasks(a, b, sort_type),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn compare_tasks(a: &Task, b: &Task, sort_type: SortType) -> Ordering {
    match sort_type {
        SortType::Priority => b.priority.rank().cmp(&a.priority.rank()),
        SortType::Date => b.created_at.cmp(&a.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::Priority;
    use chrono::{Duration, TimeZone, Utc};

    fn pool(entries: &[(&str, Priority, i64)]) -> IndexMap<TaskId, Task> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        entries
            .iter()
            .map(|(id, priority, day)| {
                let task = Task::with_id(
                    TaskId::from(*id),
                    *id,
                    "",
                    *priority,
                    base + Duration::days(*day),
                );
                (task.id.clone(), task)
            })
            .collect()
    }

    fn ids(raw: &[&str]) -> Vec<TaskId> {
        raw.iter().map(|s| TaskId::from(*s)).collect()
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let tasks = pool(&[
            ("t1", Priority::High, 0),
            ("t2", Priority::Low, 1),
            ("t3", Priority::High, 2),
        ]);
        let mut order = ids(&["t1", "t2", "t3"]);

        sort_task_ids(&mut order, &tasks, SortType::Priority);

        assert_eq!(order, ids(&["t1", "t3", "t2"]));
    }

    #[test]
    fn test_sort_by_priority_all_levels() {
        let tasks = pool(&[
            ("low", Priority::Low, 0),
            ("med", Priority::Medium, 0),
            ("high", Priority::High, 0),
        ]);
        let mut order = ids(&["low", "med", "high"]);

        sort_task_ids(&mut order, &tasks, SortType::Priority);

        assert_eq!(order, ids(&["high", "med", "low"]));
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let tasks = pool(&[
            ("old", Priority::Low, 0),
            ("new", Priority::Low, 5),
            ("mid", Priority::Low, 2),
        ]);
        let mut order = ids(&["old", "new", "mid"]);

        sort_task_ids(&mut order, &tasks, SortType::Date);

        assert_eq!(order, ids(&["new", "mid", "old"]));
    }

    #[test]
    fn test_sort_by_date_ties_keep_input_order() {
        let tasks = pool(&[("b", Priority::Low, 1), ("a", Priority::High, 1)]);
        let mut order = ids(&["b", "a"]);

        sort_task_ids(&mut order, &tasks, SortType::Date);

        assert_eq!(order, ids(&["b", "a"]));
    }

    #[test]
    fn test_unknown_ids_sort_last() {
        let tasks = pool(&[("t1", Priority::Low, 0)]);
        let mut order = ids(&["ghost", "t1"]);

        sort_task_ids(&mut order, &tasks, SortType::Priority);

        assert_eq!(order, ids(&["t1", "ghost"]));
    }

    #[test]
    fn test_sort_type_parsing() {
        assert_eq!(SortType::from_str("priority").unwrap(), SortType::Priority);
        assert_eq!(SortType::from_str("DATE").unwrap(), SortType::Date);
        assert!(SortType::from_str("title").is_err());
    }
}
