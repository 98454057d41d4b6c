use crate::libs::messages::Message;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failure of a single API request.
///
/// Client errors carry the message shown to the caller. Internal errors
/// keep the underlying detail for the log and show only the generic
/// per-operation message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(Message),

    #[error("{0}")]
    NotFound(Message),

    #[error("{message}: {detail}")]
    Internal { message: Message, detail: String },
}

impl ApiError {
    pub fn internal(message: Message, err: anyhow::Error) -> Self {
        ApiError::Internal {
            message,
            detail: format!("{:#}", err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => message.to_string(),
            ApiError::Internal { message, .. } => message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, detail } = &self {
            tracing::error!(error = %detail, "{}", message);
        }

        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
