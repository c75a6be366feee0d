use crate::domain::{
    column::Column,
    id::{ColumnId, ProjectId, TaskId},
    task::Task,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// A named board with its own columns and task pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub columns: IndexMap<ColumnId, Column>,
    /// Left-to-right layout; independent of the iteration order of `columns`
    #[serde(default)]
    pub column_order: Vec<ColumnId>,
    /// Every task of the project, regardless of which column references it
    #[serde(default)]
    pub tasks: IndexMap<TaskId, Task>,
}

/// A broken reference between a project's columns, order and task pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// A column references a task that is not in the pool
    MissingTask { column: ColumnId, task: TaskId },
    /// A pooled task no column references
    OrphanTask { task: TaskId },
    /// A task is referenced more than once across columns
    DuplicateTaskReference { task: TaskId, count: usize },
    /// A column exists but is absent from the column order
    UnorderedColumn { column: ColumnId },
    /// The column order names a column that does not exist
    MissingColumn { column: ColumnId },
    /// The column order names the same column twice
    DuplicateColumnOrder { column: ColumnId },
    /// The selected project does not exist
    DanglingCurrentProject { project: ProjectId },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTask { column, task } => {
                write!(f, "column {column} references missing task {task}")
            }
            Self::OrphanTask { task } => write!(f, "task {task} is not in any column"),
            Self::DuplicateTaskReference { task, count } => {
                write!(f, "task {task} is referenced {count} times")
            }
            Self::UnorderedColumn { column } => {
                write!(f, "column {column} is missing from the column order")
            }
            Self::MissingColumn { column } => {
                write!(f, "column order references missing column {column}")
            }
            Self::DuplicateColumnOrder { column } => {
                write!(f, "column {column} appears twice in the column order")
            }
            Self::DanglingCurrentProject { project } => {
                write!(f, "current project {project} does not exist")
            }
        }
    }
}

impl Project {
    /// Creates an empty project with no columns
    pub fn new(id: ProjectId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            columns: IndexMap::new(),
            column_order: Vec::new(),
            tasks: IndexMap::new(),
        }
    }

    /// Adds one freshly identified, empty column per title, in order
    pub fn with_columns<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for title in titles {
            self.push_column(Column::new(ColumnId::generate(), title));
        }
        self
    }

    /// Appends a column to both the mapping and the column order
    pub fn push_column(&mut self, column: Column) {
        self.column_order.push(column.id.clone());
        self.columns.insert(column.id.clone(), column);
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Columns in layout order; order entries with no column are skipped
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    /// The column whose sequence holds `task_id`, searched in layout order
    pub fn column_of(&self, task_id: &str) -> Option<&Column> {
        self.ordered_columns().find(|col| col.contains(task_id))
    }

    /// Tasks of a column, in column order, whose text matches `query`
    ///
    /// An empty query yields every task. References to tasks missing from
    /// the pool are skipped.
    pub fn visible_tasks(&self, column_id: &str, query: &str) -> Vec<&Task> {
        let Some(column) = self.columns.get(column_id) else {
            return Vec::new();
        };
        column
            .task_ids
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .filter(|task| task.matches(query))
            .collect()
    }

    /// Reports every broken reference between columns, order and pool
    pub fn check_integrity(&self) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();

        let mut seen_order: HashMap<&ColumnId, usize> = HashMap::new();
        for id in &self.column_order {
            *seen_order.entry(id).or_default() += 1;
            if !self.columns.contains_key(id) {
                violations.push(IntegrityViolation::MissingColumn { column: id.clone() });
            }
        }
        for (id, count) in &seen_order {
            if *count > 1 {
                violations.push(IntegrityViolation::DuplicateColumnOrder {
                    column: (*id).clone(),
                });
            }
        }
        for id in self.columns.keys() {
            if !seen_order.contains_key(id) {
                violations.push(IntegrityViolation::UnorderedColumn { column: id.clone() });
            }
        }

        let mut references: HashMap<&TaskId, usize> = HashMap::new();
        for column in self.columns.values() {
            for task_id in &column.task_ids {
                *references.entry(task_id).or_default() += 1;
                if !self.tasks.contains_key(task_id) {
                    violations.push(IntegrityViolation::MissingTask {
                        column: column.id.clone(),
                        task: task_id.clone(),
                    });
                }
            }
        }
        for task_id in self.tasks.keys() {
            match references.get(task_id) {
                None => violations.push(IntegrityViolation::OrphanTask {
                    task: task_id.clone(),
                }),
                Some(&count) if count > 1 => {
                    violations.push(IntegrityViolation::DuplicateTaskReference {
                        task: task_id.clone(),
                        count,
                    })
                }
                Some(_) => {}
            }
        }

        violations
    }
}
