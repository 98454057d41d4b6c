//! Client side of the task API.
//!
//! [`TaskService`] is the seam the client logic is written against;
//! [`TaskApi`] implements it over HTTP.

use crate::libs::task::{NewTask, Task, TaskChanges, TaskQuery};
use anyhow::Result;

pub mod tasks;

pub use tasks::{ApiClientError, TaskApi};

/// Remote operations on tasks. Every mutating call returns the record as
/// the server stored it.
#[allow(async_fn_in_trait)]
pub trait TaskService {
    async fn fetch_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>>;

    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    async fn update_task(&self, id: i64, changes: &TaskChanges) -> Result<Task>;

    async fn toggle_complete(&self, id: i64) -> Result<Task>;

    /// Returns the id of the deleted task.
    async fn delete_task(&self, id: i64) -> Result<i64>;
}
