use super::TaskService;
use crate::libs::app_info;
use crate::libs::messages::Message;
use crate::libs::task::{NewTask, Task, TaskChanges, TaskQuery};
use anyhow::Result;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the task API.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The server answered with a non-success status.
    #[error("{}", describe_status(.status, .message))]
    Status { status: u16, message: Option<String> },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiClientError {
    /// The `error` text from the response body, when the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiClientError::Status { message, .. } => message.as_deref(),
            ApiClientError::Transport(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Status { status, .. } => Some(*status),
            ApiClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

fn describe_status(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => Message::RequestFailed(*status).to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct DeletedBody {
    id: i64,
}

/// HTTP client for `/api/tasks`.
#[derive(Debug, Clone)]
pub struct TaskApi {
    client: Client,
    base_url: String,
}

impl TaskApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().user_agent(app_info::user_agent()).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/tasks{}", self.base_url, path)
    }

    /// Decodes a success body, or turns an error status into
    /// [`ApiClientError::Status`] carrying the server's message.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);
        tracing::debug!(status = status.as_u16(), message = ?message, "task API request failed");

        Err(ApiClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl TaskService for TaskApi {
    async fn fetch_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(status) = query.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = query.priority {
            params.push(("priority", priority.as_str().to_string()));
        }
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }

        let response = self.client.get(self.url("")).query(&params).send().await?;
        Ok(Self::decode(response).await?)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let response = self.client.post(self.url("")).json(task).send().await?;
        Ok(Self::decode(response).await?)
    }

    async fn update_task(&self, id: i64, changes: &TaskChanges) -> Result<Task> {
        let response = self.client.put(self.url(&format!("/{}", id))).json(changes).send().await?;
        Ok(Self::decode(response).await?)
    }

    async fn toggle_complete(&self, id: i64) -> Result<Task> {
        let response = self.client.patch(self.url(&format!("/{}/complete", id))).send().await?;
        Ok(Self::decode(response).await?)
    }

    async fn delete_task(&self, id: i64) -> Result<i64> {
        let response = self.client.delete(self.url(&format!("/{}", id))).send().await?;
        let body: DeletedBody = Self::decode(response).await?;
        Ok(body.id)
    }
}
