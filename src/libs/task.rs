//! Task domain types shared by the store, the HTTP API and the client.
//!
//! A [`Task`] is the single persisted entity. The store owns persisted
//! state; the client only ever holds a transient copy that it reconciles
//! from server responses.
//!
//! ## Completion flag
//!
//! `completed` is a `bool` in Rust. The SQLite column is `INTEGER` 0/1 and
//! the JSON wire format is `0`/`1` as well. Every incoming wire value is
//! decoded through [`truthy`], which is the one place the coercion rules
//! live:
//!
//! | JSON value                                                       | result    |
//! |------------------------------------------------------------------|-----------|
//! | `null`                                                           | `false`   |
//! | `true` / `false`                                                 | itself    |
//! | number                                                           | `!= 0`    |
//! | string `""`, `"0"`, `"false"`, `"no"`, `"off"` (trimmed, any case) | `false`   |
//! | any other string                                                 | `true`    |
//! | array / object                                                   | `true`    |

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wire and storage format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task urgency. Stored and transmitted as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Returned when a string is not one of `high`, `medium`, `low`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Priority must be high, medium, or low")]
pub struct ParsePriorityError(pub String);

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort rank, most urgent first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// A persisted TODO item as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a task. Also the body of a create request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl NewTask {
    /// Title-only task with default priority and no description or due date.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: None,
            due_date: None,
            priority: Priority::default(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Validated partial update. `None` keeps the stored value; for nullable
/// columns `Some(None)` clears it.
///
/// Serializes as an update request body: unchanged fields are omitted and
/// cleared ones are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }
}

/// Completion filter accepted by the list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Active,
    Completed,
}

impl StatusFilter {
    /// Lenient parse: anything other than `active`/`completed` means no filter.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(StatusFilter::Active),
            "completed" => Some(StatusFilter::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }
}

/// Store-level filter for listing tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub status: Option<StatusFilter>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
}

impl TaskQuery {
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a query from raw request parameters, dropping invalid or
    /// empty values instead of rejecting them.
    pub fn from_params(status: Option<&str>, priority: Option<&str>, search: Option<&str>) -> Self {
        Self {
            status: status.and_then(StatusFilter::parse),
            priority: priority.and_then(|p| p.parse().ok()),
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }
}

/// Decodes any JSON value into a boolean using the truth table in the
/// module docs.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !matches!(s.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no" | "off"),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT).ok()
}

/// Trims a free-text field; blank input becomes `None`.
pub fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn serialize_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(truthy(&value))
}
