pub mod board;
pub mod column;
pub mod id;
pub mod project;
pub mod sorting;
pub mod task;

pub use board::{BoardConfig, BoardState};
pub use column::Column;
pub use id::{ColumnId, ProjectId, TaskId};
pub use project::{IntegrityViolation, Project};
pub use sorting::{sort_task_ids, SortType};
pub use task::{Priority, Task};
