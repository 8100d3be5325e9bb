//! HTTP handlers: thin wrappers mapping requests onto the conversation log.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pairline_core::{ConversationError, ConversationLog, Message};
use serde_json::Value;

use crate::protocol::{DetailedNotice, Notice};

/// Conversation errors rendered as HTTP responses.
pub struct ApiError(ConversationError);

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ConversationError::InvalidPayload(_) => (
                StatusCode::BAD_REQUEST,
                Json(Notice::new("you must supply a message")),
            )
                .into_response(),
            ConversationError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(DetailedNotice {
                    message: "Cannot find message".into(),
                    details: format!("Using message id {id}"),
                }),
            )
                .into_response(),
        }
    }
}

pub async fn hello() -> Json<Notice> {
    Json(Notice::new("hello"))
}

/// 200 while a turn awaits its reply, 404 otherwise.
pub async fn waiting(State(log): State<ConversationLog>) -> (StatusCode, Json<Notice>) {
    if log.status().await.waiting {
        (StatusCode::OK, Json(Notice::new("Waiting...")))
    } else {
        (StatusCode::NOT_FOUND, Json(Notice::new("Nothing in queue")))
    }
}

pub async fn list_messages(State(log): State<ConversationLog>) -> Json<Vec<Message>> {
    Json(log.messages().await)
}

pub async fn get_message(
    Path(id): Path<String>,
    State(log): State<ConversationLog>,
) -> Result<Json<Message>, ApiError> {
    let message = log.get_message(&id).await?;
    Ok(Json(message))
}

pub async fn create_message(
    State(log): State<ConversationLog>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let Json(payload) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable message body");
        ConversationError::InvalidPayload(rejection.body_text())
    })?;

    let message = log.submit(payload).await.inspect_err(|e| {
        tracing::debug!(error = %e, "Message rejected");
    })?;

    Ok((StatusCode::CREATED, Json(message)))
}
