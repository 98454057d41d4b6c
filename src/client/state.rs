use super::filter::{filter_tasks, sort_tasks, SortMode};
use crate::libs::messages::Message;
use crate::libs::task::{Priority, StatusFilter, Task};

/// Local view filters. `status: None` means all tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub status: Option<StatusFilter>,
    pub priority: Option<Priority>,
    pub search: String,
}

impl Filters {
    /// `true` when any filter narrows the list.
    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || !self.search.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient feedback shown after an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Which task form, if any, is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dialog {
    #[default]
    Closed,
    Create,
    Edit(Task),
}

/// Everything the client knows. `tasks` always holds the full,
/// unfiltered list as last reconciled with the server.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub tasks: Vec<Task>,
    pub filters: Filters,
    pub loading: bool,
    pub notification: Option<Notification>,
    pub dialog: Dialog,
}

impl ClientState {
    /// Filtered and sorted tasks to render.
    pub fn visible_tasks(&self, sort: SortMode) -> Vec<Task> {
        sort_tasks(&filter_tasks(&self.tasks, &self.filters), sort)
    }

    /// Text for an empty list, which depends on whether filters hide tasks.
    pub fn empty_message(&self) -> Message {
        if self.filters.is_active() {
            Message::NoTasksMatchFilters
        } else {
            Message::NoTasksYet
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notification = Some(Notification::new(message, severity));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}
