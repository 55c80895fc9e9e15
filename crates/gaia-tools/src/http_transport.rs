//! HTTP transport for the tool gateway.
//!
//! | Route | Auth | Response |
//! |-------|------|----------|
//! | `GET /health` | no | service status |
//! | `GET /tools` | yes | `{ "tools": [...] }` |
//! | `POST /tools/{name}` | yes | tool result, or `{ "error": ... }` |

use crate::auth::{ApiKeyAuth, require_api_key};
use crate::error::ToolError;
use crate::executor::ToolExecutor;
use crate::protocol::ListToolsResponse;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the HTTP router.
pub fn create_router(executor: Arc<ToolExecutor>, auth: ApiKeyAuth) -> Router {
    let protected = Router::new()
        .route("/tools", get(handle_list_tools))
        .route("/tools/{name}", post(handle_call_tool))
        .route_layer(middleware::from_fn_with_state(
            Arc::new(auth),
            require_api_key,
        ))
        .with_state(executor);

    Router::new()
        .route("/health", get(handle_health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
}

/// Handle `GET /tools`.
async fn handle_list_tools(State(executor): State<Arc<ToolExecutor>>) -> Json<ListToolsResponse> {
    Json(ListToolsResponse {
        tools: executor.registry().list().to_vec(),
    })
}

/// Handle `POST /tools/{name}`. An empty body means no arguments.
async fn handle_call_tool(
    State(executor): State<Arc<ToolExecutor>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    let arguments = match parse_arguments(&body) {
        Ok(arguments) => arguments,
        Err(e) => return e.into_response(),
    };

    match executor.execute(&name, arguments).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => e.into_response(),
    }
}

fn parse_arguments(body: &[u8]) -> Result<Value, ToolError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ToolError::InvalidRequest(format!("request body is not valid JSON: {e}")))
}

/// Handle health check requests.
async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "gaia-tools",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// HTTP server for the tool gateway.
pub struct HttpServer {
    host: String,
    port: u16,
    executor: Arc<ToolExecutor>,
    auth: ApiKeyAuth,
}

impl HttpServer {
    /// Create a new HTTP server.
    pub fn new(host: impl Into<String>, port: u16, executor: ToolExecutor, auth: ApiKeyAuth) -> Self {
        Self {
            host: host.into(),
            port,
            executor: Arc::new(executor),
            auth,
        }
    }

    /// Run the HTTP server until Ctrl-C.
    pub async fn run(self) -> Result<(), ToolError> {
        let enforced = self.auth.is_enforced();
        let app = create_router(self.executor, self.auth);
        let addr = format!("{}:{}", self.host, self.port);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ToolError::StartupFailed(format!("Failed to bind to {addr}: {e}")))?;

        if !enforced {
            tracing::warn!("No API key configured; all requests are admitted");
        }
        tracing::info!(host = %self.host, port = self.port, "Tool gateway listening");
        tracing::info!("Discovery: GET http://{addr}/tools");
        tracing::info!("Execute:   POST http://{addr}/tools/{{name}}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ToolError::TransportError(e.to_string()))?;

        tracing::info!("Tool gateway stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
