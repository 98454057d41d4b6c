//! Local filtering and sorting. Neither ever goes back to the server.

use super::state::Filters;
use crate::libs::messages::Message;
use crate::libs::task::{StatusFilter, Task};
use crate::msg_bail_anyhow;
use std::cmp::Ordering;
use std::str::FromStr;

/// Secondary sort key. Incomplete tasks always come first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Due date ascending, undated tasks last.
    #[default]
    DueDate,
    /// High before medium before low.
    Priority,
    /// Newest first.
    Created,
}

impl FromStr for SortMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due" => Ok(SortMode::DueDate),
            "priority" => Ok(SortMode::Priority),
            "created" => Ok(SortMode::Created),
            other => msg_bail_anyhow!(Message::InvalidSortMode(other.to_string())),
        }
    }
}

pub fn filter_tasks(tasks: &[Task], filters: &Filters) -> Vec<Task> {
    let search = filters.search.trim().to_lowercase();

    tasks
        .iter()
        .filter(|task| match filters.status {
            Some(StatusFilter::Active) => !task.completed,
            Some(StatusFilter::Completed) => task.completed,
            None => true,
        })
        .filter(|task| filters.priority.map_or(true, |priority| task.priority == priority))
        .filter(|task| {
            search.is_empty()
                || task.title.to_lowercase().contains(&search)
                || task.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&search))
        })
        .cloned()
        .collect()
}

/// Returns a sorted copy. The sort is stable.
pub fn sort_tasks(tasks: &[Task], mode: SortMode) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| a.completed.cmp(&b.completed).then_with(|| secondary(a, b, mode)));
    sorted
}

fn secondary(a: &Task, b: &Task, mode: SortMode) -> Ordering {
    match mode {
        SortMode::DueDate => match (a.due_date, b.due_date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortMode::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortMode::Created => b.created_at.cmp(&a.created_at),
    }
}
