//! # TaskFlow Core
//!
//! State-transition engine for the TaskFlow kanban board.
//!
//! Board state changes only through [`Action`]s applied by the pure
//! [`apply`] function. Drag-and-drop gestures are turned into moves by
//! [`resolve_drop`], and [`BoardStore`] ties the engine to a [`Storage`]
//! backend so every transition is persisted. Rendering is left to callers.

pub mod domain;
pub mod engine;
pub mod error;
pub mod storage;
pub mod store;
pub mod transfer;

// Re-export commonly used types
pub use domain::{
    BoardConfig, BoardState, Column, ColumnId, IntegrityViolation, Priority, Project, ProjectId,
    SortType, Task, TaskId,
};
pub use engine::{apply, resolve_drop, Action, DragGesture};
pub use error::{Result, TaskflowError};
pub use storage::{MemoryStorage, PersistedState, Storage};
pub use store::BoardStore;

#[cfg(feature = "file-storage")]
pub use storage::FileStorage;
