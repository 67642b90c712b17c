//! Core model for `taskboard`.
//!
//! Holds the ordered task collection, the drag-to-reorder gesture state
//! machine, and the timing curves used to animate rows. Nothing in this
//! crate touches the terminal; the `taskboard` crate adapts input events
//! onto these types.

pub mod animation;
pub mod gesture;
pub mod store;
pub mod task;

pub use animation::{Easing, OffsetAnimation};
pub use gesture::{DragGesture, PressPoint, RowMetrics};
pub use store::TaskStore;
pub use task::{Task, TaskId};
