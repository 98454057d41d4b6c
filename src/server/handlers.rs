//! Request handlers for the `/api/tasks` resource.
//!
//! Each handler validates its input completely before touching the store,
//! holds the store lock for a single query, and maps store failures to a
//! generic per-operation message.

use super::error::ApiError;
use super::AppState;
use crate::libs::messages::Message;
use crate::libs::task::{normalize_text, parse_due_date, truthy, NewTask, Priority, Task, TaskChanges, TaskQuery};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

/// Query string accepted by the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

/// Body of a create request. `title` and `priority` are kept as raw JSON
/// so that wrong types get the field's own validation message.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<Value>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Value>,
}

/// Body of a full or partial update. Absent fields keep their stored
/// values; `null` clears `description` and `due_date` but is rejected for
/// `title` and `priority`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Value>,
}

impl CreateTaskRequest {
    pub fn validate(self) -> Result<NewTask, ApiError> {
        let title = self
            .title
            .as_ref()
            .and_then(Value::as_str)
            .and_then(normalize_text)
            .ok_or(ApiError::BadRequest(Message::TaskTitleRequired))?;

        // null, "", false and 0 all fall back to the default priority.
        let priority = match self.priority {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Priority::default(),
            Some(Value::String(value)) if value.is_empty() => Priority::default(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Priority::default(),
            Some(Value::String(value)) => parse_priority(&value)?,
            Some(_) => return Err(ApiError::BadRequest(Message::InvalidPriority)),
        };

        Ok(NewTask {
            title,
            description: self.description.as_deref().and_then(normalize_text),
            due_date: validate_due_date(self.due_date.as_deref())?,
            priority,
        })
    }
}

impl UpdateTaskRequest {
    pub fn validate(self) -> Result<TaskChanges, ApiError> {
        let title = match self.title {
            Some(value) => Some(
                value
                    .as_deref()
                    .and_then(normalize_text)
                    .ok_or(ApiError::BadRequest(Message::TaskTitleEmpty))?,
            ),
            None => None,
        };

        let priority = match self.priority {
            Some(Some(value)) => Some(parse_priority(&value)?),
            Some(None) => return Err(ApiError::BadRequest(Message::InvalidPriority)),
            None => None,
        };

        let due_date = match self.due_date {
            Some(value) => Some(validate_due_date(value.as_deref())?),
            None => None,
        };

        Ok(TaskChanges {
            title,
            description: self.description.map(|value| value.as_deref().and_then(normalize_text)),
            due_date,
            priority,
            completed: self.completed.as_ref().map(truthy),
        })
    }
}

pub async fn list_tasks(State(state): State<AppState>, params: Result<Query<ListParams>, QueryRejection>) -> Result<Json<Vec<Task>>, ApiError> {
    // Unparseable query strings are treated like absent filters.
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let query = TaskQuery::from_params(params.status.as_deref(), params.priority.as_deref(), params.search.as_deref());

    let tasks = state
        .tasks
        .lock()
        .list(&query)
        .map_err(|e| ApiError::internal(Message::TasksFetchFailed, e))?;

    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::BadRequest(Message::InvalidRequestBody))?;
    let new_task = request.validate()?;

    let task = state
        .tasks
        .lock()
        .insert(&new_task)
        .map_err(|e| ApiError::internal(Message::TaskCreateFailed, e))?;

    tracing::debug!(id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;

    let mut tasks = state.tasks.lock();

    // A missing task takes precedence over any problem with the body.
    let existing = tasks.get(id).map_err(|e| ApiError::internal(Message::TaskUpdateFailed, e))?;
    if existing.is_none() {
        return Err(ApiError::NotFound(Message::TaskNotFound));
    }

    let Json(request) = payload.map_err(|_| ApiError::BadRequest(Message::InvalidRequestBody))?;
    let changes = request.validate()?;
    let updated = tasks
        .update(id, &changes)
        .map_err(|e| ApiError::internal(Message::TaskUpdateFailed, e))?;

    updated.map(Json).ok_or(ApiError::NotFound(Message::TaskNotFound))
}

pub async fn toggle_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;

    let toggled = state
        .tasks
        .lock()
        .toggle(id)
        .map_err(|e| ApiError::internal(Message::TaskToggleFailed, e))?;

    toggled.map(Json).ok_or(ApiError::NotFound(Message::TaskNotFound))
}

pub async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;

    let deleted = state
        .tasks
        .lock()
        .delete(id)
        .map_err(|e| ApiError::internal(Message::TaskDeleteFailed, e))?;

    if !deleted {
        return Err(ApiError::NotFound(Message::TaskNotFound));
    }

    Ok(Json(json!({ "message": Message::TaskDeleted.to_string(), "id": id })))
}

pub async fn not_found() -> Response {
    ApiError::NotFound(Message::RouteNotFound).into_response()
}

/// Task ids are positive 64-bit integers.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ApiError::BadRequest(Message::InvalidTaskId))
}

fn parse_priority(value: &str) -> Result<Priority, ApiError> {
    value.parse().map_err(|_| ApiError::BadRequest(Message::InvalidPriority))
}

/// Blank or missing dates mean "no due date"; anything else must be a
/// real `YYYY-MM-DD` calendar date.
fn validate_due_date(value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.and_then(normalize_text) {
        Some(text) => parse_due_date(&text).map(Some).ok_or(ApiError::BadRequest(Message::InvalidDueDate)),
        None => Ok(None),
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Keeps an explicit `null` as `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
