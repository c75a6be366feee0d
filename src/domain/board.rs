use crate::domain::{
    column::Column,
    id::{ColumnId, ProjectId, TaskId},
    project::{IntegrityViolation, Project},
    task::{Priority, Task},
};
use crate::error::{Result, TaskflowError};
use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Key the board state is persisted under
    pub storage_key: String,
    /// Column titles given to projects created through `new_project`
    pub default_columns: Vec<String>,
    /// When false, the store never writes to its storage backend
    pub persist: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: "taskflow-storage-v1".to_string(),
            default_columns: vec![
                "To Do".to_string(),
                "In Progress".to_string(),
                "Done".to_string(),
            ],
            persist: true,
        }
    }
}

impl BoardConfig {
    /// Parses a configuration document; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(TaskflowError::ConfigError(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds a project with a generated id and the configured columns
    pub fn new_project(&self, name: impl Into<String>, description: impl Into<String>) -> Project {
        Project::new(ProjectId::generate(), name, description)
            .with_columns(self.default_columns.iter().cloned())
    }
}

/// Kanban board state
///
/// Projects sit behind `Arc` so a transition copies only the project it
/// touches and shares the rest with the previous state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub projects: IndexMap<ProjectId, Arc<Project>>,
    pub current_project_id: Option<ProjectId>,
    /// Transient task filter; never persisted
    pub search_query: String,
}

impl BoardState {
    pub fn new(projects: IndexMap<ProjectId, Arc<Project>>, current_project_id: Option<ProjectId>) -> Self {
        Self {
            projects,
            current_project_id,
            search_query: String::new(),
        }
    }

    /// A board with no projects and nothing selected
    pub fn empty() -> Self {
        Self::new(IndexMap::new(), None)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id).map(Arc::as_ref)
    }

    /// The selected project, if the selection points at an existing one
    pub fn current_project(&self) -> Option<&Project> {
        self.current_project_id
            .as_ref()
            .and_then(|id| self.project(id.as_str()))
    }

    /// Tasks of a column in the current project, filtered by `search_query`
    pub fn visible_tasks(&self, column_id: &str) -> Vec<&Task> {
        self.current_project()
            .map(|project| project.visible_tasks(column_id, &self.search_query))
            .unwrap_or_default()
    }

    /// Reports broken references in every project plus a dangling selection
    pub fn check_integrity(&self) -> Vec<IntegrityViolation> {
        let mut violations: Vec<IntegrityViolation> = self
            .projects
            .values()
            .flat_map(|project| project.check_integrity())
            .collect();

        if let Some(id) = &self.current_project_id {
            if !self.projects.contains_key(id) {
                violations.push(IntegrityViolation::DanglingCurrentProject { project: id.clone() });
            }
        }
        violations
    }
}

impl Default for BoardState {
    /// The built-in starter dataset
    fn default() -> Self {
        let created_at = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();
        let tasks = [
            (
                "task-1",
                "Set up the board",
                "Create the columns your workflow needs",
                Priority::High,
            ),
            (
                "task-2",
                "Add your first tasks",
                "Use the + button on any column",
                Priority::Medium,
            ),
            (
                "task-3",
                "Drag a task",
                "Move cards between columns to track progress",
                Priority::Low,
            ),
        ];

        let mut project = Project::new(
            ProjectId::from("project-1"),
            "My First Project",
            "A starter board to get going",
        );
        let mut todo = Column::new(ColumnId::from("col-1"), "To Do");
        for (id, title, description, priority) in tasks {
            let task = Task::with_id(TaskId::from(id), title, description, priority, created_at);
            todo.task_ids.push(task.id.clone());
            project.tasks.insert(task.id.clone(), task);
        }
        project.push_column(todo);
        project.push_column(Column::new(ColumnId::from("col-2"), "In Progress"));
        project.push_column(Column::new(ColumnId::from("col-3"), "Done"));

        let mut projects = IndexMap::new();
        projects.insert(project.id.clone(), Arc::new(project));

        Self::new(projects, Some(ProjectId::from("project-1")))
    }
}
