//! API-key middleware.
//!
//! When a key is configured, the first non-empty of `x-api-key` and
//! `authorization` must equal the key itself or `Bearer <key>`. Without a key
//! every request is admitted.

use crate::error::ToolError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Shared API-key check.
#[derive(Clone, Debug, Default)]
pub struct ApiKeyAuth {
    key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: key.filter(|k| !k.is_empty()),
        }
    }

    /// Admit everything.
    pub fn open() -> Self {
        Self { key: None }
    }

    pub fn is_enforced(&self) -> bool {
        self.key.is_some()
    }

    /// Whether these request headers carry the configured key.
    pub fn admits(&self, headers: &HeaderMap) -> bool {
        let Some(key) = &self.key else {
            return true;
        };
        match presented_credential(headers) {
            Some(value) => value == key || value.strip_prefix("Bearer ") == Some(key.as_str()),
            None => false,
        }
    }
}

/// The first non-empty of `x-api-key` and `authorization`.
fn presented_credential(headers: &HeaderMap) -> Option<&str> {
    non_empty_header(headers, "x-api-key")
        .or_else(|| non_empty_header(headers, header::AUTHORIZATION.as_str()))
}

fn non_empty_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Axum middleware rejecting requests without the configured API key.
pub async fn require_api_key(
    State(auth): State<Arc<ApiKeyAuth>>,
    req: Request,
    next: Next,
) -> Response {
    if auth.admits(req.headers()) {
        return next.run(req).await;
    }

    tracing::warn!(path = %req.uri().path(), "Rejected request with missing or invalid API key");
    ToolError::Unauthorized.into_response()
}
