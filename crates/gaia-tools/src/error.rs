//! Error types for the tool gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gaia_scheduling::SchedulingError;
use thiserror::Error;

/// Message returned for rejected API keys.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid or missing API Key";

/// Errors that can occur while serving a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Failed to start the server.
    #[error("failed to start tool gateway: {0}")]
    StartupFailed(String),

    /// The request body is not usable (e.g. not JSON).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No tool with this name.
    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    /// Arguments do not satisfy the tool's input schema.
    #[error("invalid arguments for tool {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// A tool's own input schema does not compile.
    #[error("invalid input schema for tool {tool}: {reason}")]
    InvalidSchema { tool: String, reason: String },

    /// Missing or wrong API key.
    #[error("Unauthorized: Invalid or missing API Key")]
    Unauthorized,

    /// The tool handler failed.
    #[error(transparent)]
    ExecutionFailed(#[from] SchedulingError),

    /// Transport error.
    #[error("transport error: {0}")]
    TransportError(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ToolError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ToolError::InvalidRequest(_) | ToolError::InvalidArguments { .. } => {
                StatusCode::BAD_REQUEST
            }
            ToolError::ToolNotFound { .. } => StatusCode::NOT_FOUND,
            ToolError::Unauthorized => StatusCode::UNAUTHORIZED,
            ToolError::ExecutionFailed(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ToolError::StartupFailed(_)
            | ToolError::InvalidSchema { .. }
            | ToolError::ExecutionFailed(_)
            | ToolError::TransportError(_)
            | ToolError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
