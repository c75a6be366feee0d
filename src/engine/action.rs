use crate::domain::{ColumnId, Project, ProjectId, SortType, Task, TaskId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Every mutation the board store accepts
///
/// Serialized as `{"type": "MOVE_TASK", "payload": {...}}` with camelCase
/// payload fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    AddTask {
        project_id: ProjectId,
        column_id: ColumnId,
        task: Task,
    },
    EditTask {
        project_id: ProjectId,
        task: Task,
    },
    DeleteTask {
        project_id: ProjectId,
        column_id: ColumnId,
        task_id: TaskId,
    },
    /// For a move within one column, `dest_index` counts positions in the
    /// sequence after the task has been removed.
    MoveTask {
        project_id: ProjectId,
        source_col_id: ColumnId,
        dest_col_id: ColumnId,
        source_index: usize,
        dest_index: usize,
        task_id: TaskId,
    },
    AddProject {
        project: Project,
    },
    EditProject {
        project_id: ProjectId,
        name: String,
    },
    DeleteProject {
        project_id: ProjectId,
    },
    SetCurrentProject {
        project_id: ProjectId,
    },
    SetSearchQuery {
        query: String,
    },
    SortColumn {
        project_id: ProjectId,
        column_id: ColumnId,
        sort_type: SortType,
    },
    RenameColumn {
        project_id: ProjectId,
        column_id: ColumnId,
        new_title: String,
    },
    AddColumn {
        project_id: ProjectId,
        title: String,
    },
    DeleteColumn {
        project_id: ProjectId,
        column_id: ColumnId,
    },
    ClearColumn {
        project_id: ProjectId,
        column_id: ColumnId,
    },
    ImportData {
        projects: IndexMap<ProjectId, Project>,
    },
}

impl Action {
    /// Wire name of the action, e.g. `MOVE_TASK`
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTask { .. } => "ADD_TASK",
            Self::EditTask { .. } => "EDIT_TASK",
            Self::DeleteTask { .. } => "DELETE_TASK",
            Self::MoveTask { .. } => "MOVE_TASK",
            Self::AddProject { .. } => "ADD_PROJECT",
            Self::EditProject { .. } => "EDIT_PROJECT",
            Self::DeleteProject { .. } => "DELETE_PROJECT",
            Self::SetCurrentProject { .. } => "SET_CURRENT_PROJECT",
            Self::SetSearchQuery { .. } => "SET_SEARCH_QUERY",
            Self::SortColumn { .. } => "SORT_COLUMN",
            Self::RenameColumn { .. } => "RENAME_COLUMN",
            Self::AddColumn { .. } => "ADD_COLUMN",
            Self::DeleteColumn { .. } => "DELETE_COLUMN",
            Self::ClearColumn { .. } => "CLEAR_COLUMN",
            Self::ImportData { .. } => "IMPORT_DATA",
        }
    }

    /// Whether the action changes persisted data (everything except the filter)
    pub fn is_persistent(&self) -> bool {
        !matches!(self, Self::SetSearchQuery { .. })
    }
}
