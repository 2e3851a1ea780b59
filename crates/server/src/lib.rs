//! Yoga Agent Server
//!
//! JSON HTTP API for mood chat, voice chat and guided practice sessions.

pub mod conversation;
pub mod http;
pub mod metrics;
pub mod payload;
pub mod practice;
pub mod state;

mod chat;

pub use conversation::{Conversation, ConversationManager};
pub use http::create_router;
pub use metrics::{init_metrics, metrics_handler, record_classification, record_error, record_request};
pub use payload::Payload;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use yoga_agent_persistence::PersistenceError;

/// Server errors
///
/// Every variant renders as `{"error": "<message>"}` with the matching
/// status code.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The catalog has no sequences to practice
    #[error("Database not initialized. Please run: yoga-agent seed")]
    DatabaseUninitialized,

    #[error("{0}")]
    Persistence(#[from] PersistenceError),

    #[error("{0}")]
    Internal(String),
}

impl ServerError {
    fn kind(&self) -> &'static str {
        match self {
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::NotFound(_) => "not_found",
            ServerError::DatabaseUninitialized => "catalog_empty",
            ServerError::Persistence(_) => "persistence",
            ServerError::Internal(_) => "internal",
        }
    }
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::DatabaseUninitialized
            | ServerError::Persistence(_)
            | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        record_error(self.kind());

        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Request failed");
        } else {
            tracing::debug!(error = %self, kind = self.kind(), "Request rejected");
        }

        let body = match &self {
            ServerError::DatabaseUninitialized => serde_json::json!({
                "error": self.to_string(),
                "debug_info": "No yoga sequences found in database",
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
