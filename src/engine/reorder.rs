//! Maps a finished drag gesture to the move it implies.

use crate::domain::Project;
use crate::engine::action::Action;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The end of a drag: the dragged task and what it was released over
///
/// `over` is either a task id or, for drops onto an empty area of a
/// column, the column id itself. `None` means the drop landed outside any
/// target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragGesture {
    pub active: String,
    pub over: Option<String>,
}

impl DragGesture {
    pub fn new(active: impl Into<String>, over: Option<&str>) -> Self {
        Self {
            active: active.into(),
            over: over.map(str::to_string),
        }
    }

    /// Resolves this gesture against `project`
    pub fn resolve(&self, project: &Project) -> Option<Action> {
        resolve_drop(project, &self.active, self.over.as_deref())
    }
}

/// Computes the `MoveTask` for dropping `active` over `over`
///
/// Returns `None` when nothing should change: no drop target, an active id
/// no column holds, a target that is neither a task nor a column, or a drop
/// onto the task's own position.
pub fn resolve_drop(project: &Project, active: &str, over: Option<&str>) -> Option<Action> {
    let Some(over) = over else {
        debug!(active, "dropped outside any target");
        return None;
    };

    let Some(source) = project.column_of(active) else {
        debug!(active, "dragged task is not in any column");
        return None;
    };

    let Some(dest) = project.column_of(over).or_else(|| project.column(over)) else {
        debug!(active, over, "drop target is neither a task nor a column");
        return None;
    };

    let source_index = source.position_of(active)?;
    let dest_index = dest.position_of(over).unwrap_or(dest.len());

    if source.id == dest.id && source_index == dest_index {
        return None;
    }

    Some(Action::MoveTask {
        project_id: project.id.clone(),
        source_col_id: source.id.clone(),
        dest_col_id: dest.id.clone(),
        source_index,
        dest_index,
        task_id: active.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardState, ColumnId, ProjectId, TaskId};
    use crate::engine::reducer::apply;

    fn project() -> Project {
        BoardState::default()
            .project("project-1")
            .unwrap()
            .clone()
    }

    fn expect_move(action: Option<Action>) -> (String, String, usize, usize) {
        match action {
            Some(Action::MoveTask {
                source_col_id,
                dest_col_id,
                source_index,
                dest_index,
                ..
            }) => (
                source_col_id.to_string(),
                dest_col_id.to_string(),
                source_index,
                dest_index,
            ),
            other => panic!("expected MoveTask, got {other:?}"),
        }
    }

    #[test]
    fn test_drop_outside_any_target() {
        assert_eq!(resolve_drop(&project(), "task-1", None), None);
    }

    #[test]
    fn test_unknown_active_id() {
        assert_eq!(resolve_drop(&project(), "ghost", Some("task-2")), None);
    }

    #[test]
    fn test_unknown_over_id() {
        assert_eq!(resolve_drop(&project(), "task-1", Some("nowhere")), None);
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        assert_eq!(resolve_drop(&project(), "task-2", Some("task-2")), None);
    }

    #[test]
    fn test_drop_on_task_in_same_column() {
        let action = resolve_drop(&project(), "task-1", Some("task-3"));
        assert_eq!(
            expect_move(action),
            ("col-1".to_string(), "col-1".to_string(), 0, 2)
        );
    }

    #[test]
    fn test_drop_on_empty_column() {
        let action = resolve_drop(&project(), "task-1", Some("col-2"));
        assert_eq!(
            action,
            Some(Action::MoveTask {
                project_id: ProjectId::from("project-1"),
                source_col_id: ColumnId::from("col-1"),
                dest_col_id: ColumnId::from("col-2"),
                source_index: 0,
                dest_index: 0,
                task_id: TaskId::from("task-1"),
            })
        );
    }

    #[test]
    fn test_drop_on_own_column_appends() {
        let action = resolve_drop(&project(), "task-1", Some("col-1"));
        assert_eq!(
            expect_move(action),
            ("col-1".to_string(), "col-1".to_string(), 0, 3)
        );
    }

    #[test]
    fn test_drop_on_task_in_other_column_takes_its_place() {
        let mut board = BoardState::default();
        let action = resolve_drop(board.current_project().unwrap(), "task-2", Some("col-3")).unwrap();
        board = apply(&board, action);

        let project = board.current_project().unwrap();
        let action = resolve_drop(project, "task-1", Some("task-2"));
        assert_eq!(
            expect_move(action),
            ("col-1".to_string(), "col-3".to_string(), 0, 0)
        );
    }

    #[test]
    fn test_gesture_resolve_and_apply() {
        let board = BoardState::default();
        let gesture = DragGesture::new("task-3", Some("task-1"));

        let action = gesture.resolve(board.current_project().unwrap()).unwrap();
        let next = apply(&board, action);

        let order: Vec<&str> = next
            .current_project()
            .unwrap()
            .column("col-1")
            .unwrap()
            .task_ids
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(order, vec!["task-3", "task-1", "task-2"]);
    }

    #[test]
    fn test_self_drop_differs_between_resolver_and_direct_move() {
        let board = BoardState::default();
        let project = board.current_project().unwrap();

        assert!(resolve_drop(project, "task-2", Some("task-2")).is_none());

        let direct = apply(
            &board,
            Action::MoveTask {
                project_id: project.id.clone(),
                source_col_id: ColumnId::from("col-1"),
                dest_col_id: ColumnId::from("col-1"),
                source_index: 1,
                dest_index: 1,
                task_id: TaskId::from("task-2"),
            },
        );
        assert_eq!(
            direct.current_project().unwrap().column("col-1"),
            project.column("col-1")
        );
    }
}
