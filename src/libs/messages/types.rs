/// Every user-facing and log-facing text in tudu.
///
/// Variants are grouped by the component that emits them. The text lives
/// in the `Display` impl in `display.rs`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TASK API MESSAGES ===
    TaskTitleRequired,
    TaskTitleEmpty,
    InvalidPriority,
    InvalidDueDate,
    InvalidTaskId,
    InvalidRequestBody,
    TaskNotFound,
    RouteNotFound,
    TasksFetchFailed,
    TaskCreateFailed,
    TaskUpdateFailed,
    TaskToggleFailed,
    TaskDeleteFailed,
    TaskDeleted,

    // === SERVER MESSAGES ===
    ServerListening(String), // address
    ServerShuttingDown,
    ServerStopped,
    ServerSignalFailed(String), // error
    InvalidBindAddress(String), // address

    // === STORE MESSAGES ===
    StoreOpened(String), // location
    StoreClosed,
    StoreCloseFailed(String), // error
    SampleTasksSeeded(usize),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,

    // === CLIENT MESSAGES ===
    TaskCreated,
    TaskUpdated,
    TaskCompleted,
    TaskReopened,
    TasksLoadFailed,
    TaskSaveFailed,
    TitleRequired,
    NoTasksYet,
    NoTasksMatchFilters,
    TasksHeader(usize, usize), // visible, total
    TaskNotFoundWithId(i64),
    EditingTask(String), // title
    NoChangesDetected,
    DeleteCancelled,
    RequestFailed(u16), // HTTP status
    InvalidDueDateInput(String),
    InvalidSortMode(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError(String),

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskDueDate,
    PromptTaskPriority,
    PromptConfirmDelete,
    PromptServerBind,
    PromptDatabasePath,
    PromptSeedSamples,
    PromptApiUrl,
}
