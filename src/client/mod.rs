//! Task client logic, independent of how it is rendered.
//!
//! The client loads the full list once, filters and sorts it locally,
//! and replaces its copy of a task with whatever the server returns after
//! each mutation.

pub mod board;
pub mod filter;
pub mod form;
pub mod state;

pub use board::{transition, TaskBoard, TaskEvent};
pub use filter::{filter_tasks, sort_tasks, SortMode};
pub use form::TaskForm;
pub use state::{ClientState, Dialog, Filters, Notification, Severity};
