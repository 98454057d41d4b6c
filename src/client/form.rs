use crate::libs::messages::Message;
use crate::libs::task::{normalize_text, NewTask, Priority, Task, TaskChanges};
use chrono::NaiveDate;

/// Editable fields of the create/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    /// Inline validation error for the title field.
    pub error: Option<Message>,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date,
            priority: task.priority,
            error: None,
        }
    }

    /// `true` when the editable fields still hold `task`'s values.
    pub fn is_unchanged_from(&self, task: &Task) -> bool {
        let stored = Self::from_task(task);
        self.title == stored.title
            && self.description == stored.description
            && self.due_date == stored.due_date
            && self.priority == stored.priority
    }

    /// Checks the title. On failure the error is kept on the form and
    /// nothing may be submitted.
    pub fn validate(&mut self) -> bool {
        if self.title.trim().is_empty() {
            self.error = Some(Message::TitleRequired);
            false
        } else {
            self.error = None;
            true
        }
    }

    /// Payload for a create request, or `None` when validation fails.
    pub fn to_new_task(&mut self) -> Option<NewTask> {
        if !self.validate() {
            return None;
        }

        Some(NewTask {
            title: self.title.trim().to_string(),
            description: normalize_text(&self.description),
            due_date: self.due_date,
            priority: self.priority,
        })
    }

    /// Payload for an update request. Every form field is sent so the
    /// stored task matches the form exactly.
    pub fn to_changes(&mut self) -> Option<TaskChanges> {
        if !self.validate() {
            return None;
        }

        Some(TaskChanges {
            title: Some(self.title.trim().to_string()),
            description: Some(normalize_text(&self.description)),
            due_date: Some(self.due_date),
            priority: Some(self.priority),
            completed: None,
        })
    }
}
