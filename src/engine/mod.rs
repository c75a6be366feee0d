pub mod action;
pub mod reducer;
pub mod reorder;

pub use action::Action;
pub use reducer::apply;
pub use reorder::{resolve_drop, DragGesture};
