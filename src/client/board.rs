use super::filter::SortMode;
use super::form::TaskForm;
use super::state::{ClientState, Dialog, Filters, Severity};
use crate::api::{ApiClientError, TaskService};
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskQuery};

/// Something the server confirmed. Drives [`transition`].
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    Loaded(Vec<Task>),
    Created(Task),
    Updated(Task),
    Toggled(Task),
    Deleted(i64),
}

/// Next task list after `event`. Never mutates `prev`.
pub fn transition(prev: &[Task], event: &TaskEvent) -> Vec<Task> {
    match event {
        TaskEvent::Loaded(tasks) => tasks.clone(),
        TaskEvent::Created(task) => {
            let mut next = prev.to_vec();
            next.push(task.clone());
            next
        }
        TaskEvent::Updated(task) | TaskEvent::Toggled(task) => prev
            .iter()
            .map(|t| if t.id == task.id { task.clone() } else { t.clone() })
            .collect(),
        TaskEvent::Deleted(id) => prev.iter().filter(|t| t.id != *id).cloned().collect(),
    }
}

/// Text for a failed request: the server's own message when it sent one.
pub fn failure_message(err: &anyhow::Error, fallback: Message) -> String {
    err.downcast_ref::<ApiClientError>()
        .and_then(ApiClientError::server_message)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// Client controller: owns the state and reconciles it with the
/// responses of a [`TaskService`]. Requests are issued one at a time and
/// the last response wins.
pub struct TaskBoard<S: TaskService> {
    service: S,
    state: ClientState,
}

impl<S: TaskService> TaskBoard<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: ClientState::default(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn apply(&mut self, event: TaskEvent) {
        self.state.tasks = transition(&self.state.tasks, &event);
    }

    /// Fetches the full list once. On failure the list is left empty.
    pub async fn load(&mut self) -> bool {
        self.state.dismiss_notification();
        self.state.loading = true;
        let result = self.service.fetch_tasks(&TaskQuery::all()).await;
        self.state.loading = false;

        match result {
            Ok(tasks) => {
                self.apply(TaskEvent::Loaded(tasks));
                true
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "loading tasks failed");
                self.state.tasks.clear();
                self.state.notify(Message::TasksLoadFailed.to_string(), Severity::Error);
                false
            }
        }
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.state.filters = filters;
    }

    pub fn visible_tasks(&self, sort: SortMode) -> Vec<Task> {
        self.state.visible_tasks(sort)
    }

    pub fn find(&self, id: i64) -> Option<&Task> {
        self.state.tasks.iter().find(|t| t.id == id)
    }

    pub fn open_create(&mut self) -> TaskForm {
        self.state.dialog = Dialog::Create;
        TaskForm::new()
    }

    pub fn open_edit(&mut self, task: &Task) -> TaskForm {
        self.state.dialog = Dialog::Edit(task.clone());
        TaskForm::from_task(task)
    }

    pub fn close_dialog(&mut self) {
        self.state.dialog = Dialog::Closed;
    }

    /// Submits the open form. An invalid form sends nothing and keeps the
    /// dialog open; a failed request keeps it open too. An edit that
    /// changes nothing is not sent and closes the dialog with a warning.
    pub async fn submit(&mut self, form: &mut TaskForm) -> bool {
        self.state.dismiss_notification();

        let result = match self.state.dialog.clone() {
            Dialog::Edit(task) => {
                if form.is_unchanged_from(&task) {
                    self.state.notify(Message::NoChangesDetected.to_string(), Severity::Warning);
                    self.close_dialog();
                    return false;
                }
                let Some(changes) = form.to_changes() else {
                    return false;
                };
                self.service
                    .update_task(task.id, &changes)
                    .await
                    .map(|task| (TaskEvent::Updated(task), Message::TaskUpdated))
            }
            Dialog::Create | Dialog::Closed => {
                let Some(new_task) = form.to_new_task() else {
                    return false;
                };
                self.service
                    .create_task(&new_task)
                    .await
                    .map(|task| (TaskEvent::Created(task), Message::TaskCreated))
            }
        };

        match result {
            Ok((event, message)) => {
                self.apply(event);
                self.state.notify(message.to_string(), Severity::Success);
                self.close_dialog();
                true
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "saving task failed");
                self.state.notify(failure_message(&e, Message::TaskSaveFailed), Severity::Error);
                false
            }
        }
    }

    /// Flips completion and reports `Task completed` or `Task reopened`.
    pub async fn toggle(&mut self, id: i64) -> Option<Task> {
        self.state.dismiss_notification();
        match self.service.toggle_complete(id).await {
            Ok(task) => {
                let message = if task.completed { Message::TaskCompleted } else { Message::TaskReopened };
                self.apply(TaskEvent::Toggled(task.clone()));
                self.state.notify(message.to_string(), Severity::Info);
                Some(task)
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "toggling task failed");
                self.state.notify(failure_message(&e, Message::TaskUpdateFailed), Severity::Error);
                None
            }
        }
    }

    /// Deletes a task. Confirmation is the caller's job.
    pub async fn delete(&mut self, id: i64) -> bool {
        self.state.dismiss_notification();
        match self.service.delete_task(id).await {
            Ok(deleted) => {
                self.apply(TaskEvent::Deleted(deleted));
                self.state.notify(Message::TaskDeleted.to_string(), Severity::Success);
                true
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "deleting task failed");
                self.state.notify(failure_message(&e, Message::TaskDeleteFailed), Severity::Error);
                false
            }
        }
    }
}
