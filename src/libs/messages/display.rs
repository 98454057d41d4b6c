//! Display implementation for tudu messages.
//!
//! All message text is defined here, in one match, so the HTTP error
//! bodies, console notifications and log lines stay consistent.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK API MESSAGES ===
            Message::TaskTitleRequired => "Task title is required".to_string(),
            Message::TaskTitleEmpty => "Task title cannot be empty".to_string(),
            Message::InvalidPriority => "Priority must be high, medium, or low".to_string(),
            Message::InvalidDueDate => "Due date must be a valid date in YYYY-MM-DD format".to_string(),
            Message::InvalidTaskId => "Valid task ID is required".to_string(),
            Message::InvalidRequestBody => "Invalid request body".to_string(),
            Message::TaskNotFound => "Task not found".to_string(),
            Message::RouteNotFound => "Not found".to_string(),
            Message::TasksFetchFailed => "Failed to fetch tasks".to_string(),
            Message::TaskCreateFailed => "Failed to create task".to_string(),
            Message::TaskUpdateFailed => "Failed to update task".to_string(),
            Message::TaskToggleFailed => "Failed to toggle task completion".to_string(),
            Message::TaskDeleteFailed => "Failed to delete task".to_string(),
            Message::TaskDeleted => "Task deleted successfully".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Task API listening on http://{}", addr),
            Message::ServerShuttingDown => "Shutdown signal received, draining connections".to_string(),
            Message::ServerStopped => "Task API stopped".to_string(),
            Message::ServerSignalFailed(e) => format!("Failed to listen for shutdown signal: {}", e),
            Message::InvalidBindAddress(addr) => format!("Invalid bind address: {}", addr),

            // === STORE MESSAGES ===
            Message::StoreOpened(location) => format!("Task store opened at {}", location),
            Message::StoreClosed => "Task store closed".to_string(),
            Message::StoreCloseFailed(e) => format!("Failed to close task store: {}", e),
            Message::SampleTasksSeeded(count) => format!("Database initialized with {} sample tasks", count),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, e) => format!("Migration v{} failed: {}", version, e),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),

            // === CLIENT MESSAGES ===
            Message::TaskCreated => "Task created successfully".to_string(),
            Message::TaskUpdated => "Task updated successfully".to_string(),
            Message::TaskCompleted => "Task completed".to_string(),
            Message::TaskReopened => "Task reopened".to_string(),
            Message::TasksLoadFailed => "Failed to load tasks".to_string(),
            Message::TaskSaveFailed => "Failed to save task".to_string(),
            Message::TitleRequired => "Title is required".to_string(),
            Message::NoTasksYet => "No tasks yet. Run 'tudu add' to get started!".to_string(),
            Message::NoTasksMatchFilters => "No tasks match your filters".to_string(),
            Message::TasksHeader(visible, total) => format!("Tasks ({} of {})", visible, total),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found", id),
            Message::EditingTask(title) => format!("Editing task: {}", title),
            Message::NoChangesDetected => "No changes detected".to_string(),
            Message::DeleteCancelled => "Deletion cancelled".to_string(),
            Message::RequestFailed(status) => format!("Request failed with status {}", status),
            Message::InvalidDueDateInput(value) => format!("'{}' is not a valid date, expected YYYY-MM-DD", value),
            Message::InvalidSortMode(value) => format!("Unknown sort mode '{}', expected due, priority or created", value),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseError(e) => format!("Failed to parse configuration: {}", e),

            // === PROMPTS ===
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),
            Message::PromptTaskDueDate => "Due date (YYYY-MM-DD, empty for none)".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),
            Message::PromptConfirmDelete => "Are you sure you want to delete this task?".to_string(),
            Message::PromptServerBind => "Server bind address".to_string(),
            Message::PromptDatabasePath => "Database path (':memory:' for in-memory)".to_string(),
            Message::PromptSeedSamples => "Seed a new database with sample tasks?".to_string(),
            Message::PromptApiUrl => "Task API URL used by the client".to_string(),
        };
        write!(f, "{}", text)
    }
}
