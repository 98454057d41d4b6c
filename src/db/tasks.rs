//! The task store.
//!
//! All queries are parameterized. Lists come back in the canonical order:
//! incomplete before complete, then due date ascending with undated tasks
//! last, then newest first.

use super::db::Db;
use crate::libs::messages::Message;
use crate::libs::task::{NewTask, Priority, StatusFilter, Task, TaskChanges, TaskQuery};
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const SELECT_TASKS: &str = "SELECT id, title, description, due_date, priority, completed, created_at, updated_at FROM tasks";
const ORDER_TASKS: &str = "ORDER BY completed ASC, due_date IS NULL, due_date ASC, created_at DESC, id DESC";
const SELECT_TASK_BY_ID: &str =
    "SELECT id, title, description, due_date, priority, completed, created_at, updated_at FROM tasks WHERE id = ?1";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, due_date, priority, completed, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)";
const UPDATE_TASK: &str =
    "UPDATE tasks SET title = ?2, description = ?3, due_date = ?4, priority = ?5, completed = ?6, updated_at = ?7 WHERE id = ?1";
const TOGGLE_TASK: &str = "UPDATE tasks SET completed = CASE completed WHEN 1 THEN 0 ELSE 1 END, updated_at = ?2 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks";

pub struct Tasks {
    conn: Connection,
}

impl Tasks {
    pub fn new(db: Db) -> Self {
        Tasks { conn: db.conn }
    }

    /// Opens the database at `location` and seeds the sample tasks when
    /// `seed` is set and the database did not exist before.
    pub fn open(location: &str, seed: bool) -> Result<Self> {
        let db = Db::open(location)?;
        let fresh = db.is_fresh();
        let mut tasks = Tasks::new(db);

        if seed && fresh {
            let seeded = tasks.seed_samples()?;
            msg_debug!(Message::SampleTasksSeeded(seeded));
        }

        Ok(tasks)
    }

    pub fn list(&mut self, query: &TaskQuery) -> Result<Vec<Task>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<SqlValue> = Vec::new();

        match query.status {
            Some(StatusFilter::Active) => clauses.push("completed = 0".to_string()),
            Some(StatusFilter::Completed) => clauses.push("completed = 1".to_string()),
            None => {}
        }

        if let Some(priority) = query.priority {
            values.push(SqlValue::Text(priority.as_str().to_string()));
            clauses.push(format!("priority = ?{}", values.len()));
        }

        if let Some(search) = &query.search {
            values.push(SqlValue::Text(format!("%{}%", escape_like(search))));
            let n = values.len();
            clauses.push(format!("(title LIKE ?{n} ESCAPE '\\' OR description LIKE ?{n} ESCAPE '\\')"));
        }

        let sql = if clauses.is_empty() {
            format!("{} {}", SELECT_TASKS, ORDER_TASKS)
        } else {
            format!("{} WHERE {} {}", SELECT_TASKS, clauses.join(" AND "), ORDER_TASKS)
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let task_iter = stmt.query_map(params_from_iter(values.iter()), task_from_row)?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }

        Ok(tasks)
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(SELECT_TASK_BY_ID, params![id], task_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Inserts a task and returns the stored record.
    pub fn insert(&mut self, task: &NewTask) -> Result<Task> {
        let now = timestamp();
        self.conn
            .execute(INSERT_TASK, params![task.title.trim(), task.description, task.due_date, task.priority, now])?;
        let id = self.conn.last_insert_rowid();

        self.get(id)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFoundWithId(id)))
    }

    /// Applies `changes` to an existing task. Returns `None` when the id
    /// does not exist.
    pub fn update(&mut self, id: i64, changes: &TaskChanges) -> Result<Option<Task>> {
        let Some(current) = self.get(id)? else {
            return Ok(None);
        };

        let title = changes.title.as_deref().map(str::trim).unwrap_or(&current.title);
        let description: Option<&str> = match &changes.description {
            Some(value) => value.as_deref(),
            None => current.description.as_deref(),
        };
        let due_date: Option<NaiveDate> = changes.due_date.unwrap_or(current.due_date);
        let priority: Priority = changes.priority.unwrap_or(current.priority);
        let completed = changes.completed.unwrap_or(current.completed);

        self.conn
            .execute(UPDATE_TASK, params![id, title, description, due_date, priority, completed, timestamp()])?;

        self.get(id)
    }

    /// Flips the completion flag. Returns `None` when the id does not exist.
    pub fn toggle(&mut self, id: i64) -> Result<Option<Task>> {
        let affected = self.conn.execute(TOGGLE_TASK, params![id, timestamp()])?;
        if affected == 0 {
            return Ok(None);
        }

        self.get(id)
    }

    /// Hard-deletes a task. Returns `false` when the id does not exist.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        Ok(affected > 0)
    }

    pub fn count(&mut self) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_TASKS, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Inserts the three sample tasks shown on first start.
    pub fn seed_samples(&mut self) -> Result<usize> {
        let samples = sample_tasks();
        for task in &samples {
            self.insert(task)?;
        }
        Ok(samples.len())
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        msg_debug!(Message::StoreClosed);
        Ok(())
    }
}

fn sample_tasks() -> Vec<NewTask> {
    vec![
        NewTask {
            due_date: NaiveDate::from_ymd_opt(2025, 11, 10),
            ..NewTask::new("Complete project documentation")
                .with_description("Write comprehensive docs for the TODO app")
                .with_priority(Priority::High)
        },
        NewTask {
            due_date: NaiveDate::from_ymd_opt(2025, 11, 5),
            ..NewTask::new("Review pull requests")
                .with_description("Check and approve pending PRs")
                .with_priority(Priority::Medium)
        },
        NewTask::new("Update dependencies")
            .with_description("Run npm audit and update packages")
            .with_priority(Priority::Low),
    ]
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        priority: row.get(4)?,
        completed: row.get::<_, i64>(5)? != 0,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Current time truncated to milliseconds.
fn timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Escapes `LIKE` wildcards so the term matches as a literal substring.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
