//! The board state-transition function.

use crate::domain::{sort_task_ids, BoardState, Column, ColumnId, Project};
use crate::engine::action::Action;
use std::sync::Arc;
use tracing::debug;

/// Applies `action` to `state` and returns the resulting state
///
/// `state` is left untouched. Projects the action does not touch are shared
/// between the two states; the touched project is copied on write. Actions
/// whose target project or column does not exist return an equal state.
pub fn apply(state: &BoardState, action: Action) -> BoardState {
    let mut next = state.clone();
    let name = action.name();

    match action {
        Action::AddTask {
            project_id,
            column_id,
            task,
        } => {
            with_column(&mut next, project_id.as_str(), column_id.as_str(), name, |project| {
                if let Some(column) = project.columns.get_mut(&column_id) {
                    column.task_ids.push(task.id.clone());
                }
                project.tasks.insert(task.id.clone(), task);
            });
        }

        Action::EditTask { project_id, task } => {
            with_project(&mut next, project_id.as_str(), name, |project| {
                if !project.tasks.contains_key(&task.id) {
                    debug!(action = name, task_id = %task.id, "task not in pool; inserting unreferenced");
                }
                project.tasks.insert(task.id.clone(), task);
            });
        }

        Action::DeleteTask {
            project_id,
            column_id,
            task_id,
        } => {
            with_project(&mut next, project_id.as_str(), name, |project| {
                project.tasks.shift_remove(&task_id);
                if let Some(column) = project.columns.get_mut(&column_id) {
                    column.task_ids.retain(|id| id != &task_id);
                }
            });
        }

        Action::MoveTask {
            project_id,
            source_col_id,
            dest_col_id,
            source_index,
            dest_index,
            task_id,
        } => {
            let valid = next.project(project_id.as_str()).is_some_and(|project| {
                project.columns.contains_key(&dest_col_id)
                    && project
                        .columns
                        .get(&source_col_id)
                        .is_some_and(|col| source_index < col.len())
            });
            if !valid {
                debug!(
                    action = name,
                    %project_id,
                    %source_col_id,
                    %dest_col_id,
                    source_index,
                    "move target not found; ignoring"
                );
                return next;
            }

            let at_source = next
                .project(project_id.as_str())
                .and_then(|project| project.column(source_col_id.as_str()))
                .and_then(|column| column.task_ids.get(source_index));
            if let Some(moved) = at_source.filter(|id| **id != task_id) {
                debug!(
                    action = name,
                    %task_id,
                    %moved,
                    source_index,
                    "payload task differs from task at source index; moving the latter"
                );
            }

            with_project(&mut next, project_id.as_str(), name, |project| {
                move_task(project, &source_col_id, &dest_col_id, source_index, dest_index);
            });
            debug!(action = name, %task_id, %source_col_id, %dest_col_id, dest_index, "task moved");
        }

        Action::AddProject { project } => {
            let id = project.id.clone();
            next.projects.insert(id.clone(), Arc::new(project));
            next.current_project_id = Some(id);
        }

        Action::EditProject {
            project_id,
            name: new_name,
        } => {
            with_project(&mut next, project_id.as_str(), name, |project| {
                project.name = new_name;
            });
        }

        Action::DeleteProject { project_id } => {
            next.projects.shift_remove(&project_id);
            if next.current_project_id.as_ref() == Some(&project_id) {
                next.current_project_id = next.projects.keys().next().cloned();
            }
        }

        Action::SetCurrentProject { project_id } => {
            next.current_project_id = Some(project_id);
        }

        Action::SetSearchQuery { query } => {
            next.search_query = query;
        }

        Action::SortColumn {
            project_id,
            column_id,
            sort_type,
        } => {
            with_column(&mut next, project_id.as_str(), column_id.as_str(), name, |project| {
                let Project { columns, tasks, .. } = project;
                if let Some(column) = columns.get_mut(&column_id) {
                    sort_task_ids(&mut column.task_ids, tasks, sort_type);
                }
            });
        }

        Action::RenameColumn {
            project_id,
            column_id,
            new_title,
        } => {
            with_column(&mut next, project_id.as_str(), column_id.as_str(), name, |project| {
                if let Some(column) = project.columns.get_mut(&column_id) {
                    column.title = new_title;
                }
            });
        }

        Action::AddColumn { project_id, title } => {
            with_project(&mut next, project_id.as_str(), name, |project| {
                project.push_column(Column::new(ColumnId::generate(), title));
            });
        }

        Action::DeleteColumn {
            project_id,
            column_id,
        } => {
            with_column(&mut next, project_id.as_str(), column_id.as_str(), name, |project| {
                if let Some(column) = project.columns.shift_remove(&column_id) {
                    for task_id in &column.task_ids {
                        project.tasks.shift_remove(task_id);
                    }
                }
                project.column_order.retain(|id| id != &column_id);
            });
        }

        Action::ClearColumn {
            project_id,
            column_id,
        } => {
            with_column(&mut next, project_id.as_str(), column_id.as_str(), name, |project| {
                let Project { columns, tasks, .. } = project;
                if let Some(column) = columns.get_mut(&column_id) {
                    for task_id in column.task_ids.drain(..) {
                        tasks.shift_remove(&task_id);
                    }
                }
            });
        }

        Action::ImportData { projects } => {
            next.projects = projects
                .into_iter()
                .map(|(id, project)| (id, Arc::new(project)))
                .collect();
            next.current_project_id = next.projects.keys().next().cloned();
        }
    }

    next
}

/// Splices the task at `source_index` out of the source column and into the
/// destination at `dest_index`, clamped to the destination length.
///
/// Within one column the index is applied to the already-shortened sequence.
fn move_task(
    project: &mut Project,
    source_col_id: &ColumnId,
    dest_col_id: &ColumnId,
    source_index: usize,
    dest_index: usize,
) {
    let Some(source) = project.columns.get_mut(source_col_id) else {
        return;
    };
    let moved = source.task_ids.remove(source_index);

    if source_col_id == dest_col_id {
        let at = dest_index.min(source.task_ids.len());
        source.task_ids.insert(at, moved);
        return;
    }

    if let Some(dest) = project.columns.get_mut(dest_col_id) {
        let at = dest_index.min(dest.task_ids.len());
        dest.task_ids.insert(at, moved);
    }
}

/// Runs `f` on a copy-on-write handle to the project, if it exists
fn with_project<F>(state: &mut BoardState, project_id: &str, action: &str, f: F)
where
    F: FnOnce(&mut Project),
{
    match state.projects.get_mut(project_id) {
        Some(project) => f(Arc::make_mut(project)),
        None => debug!(action, project_id, "project not found; ignoring"),
    }
}

/// Like `with_project`, but only when the project also has `column_id`
fn with_column<F>(state: &mut BoardState, project_id: &str, column_id: &str, action: &str, f: F)
where
    F: FnOnce(&mut Project),
{
    let exists = state
        .project(project_id)
        .is_some_and(|project| project.columns.contains_key(column_id));
    if exists {
        with_project(state, project_id, action, f);
    } else {
        debug!(action, project_id, column_id, "column not found; ignoring");
    }
}
