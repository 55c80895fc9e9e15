//! # gaia-tools
//!
//! Tool gateway for the Gaia scheduling operations.
//!
//! Agents discover the tools with `GET /tools` and call one with
//! `POST /tools/{name}`:
//!
//! ```text
//! AI agent / workflow engine
//!       │
//!       │ HTTP + API key
//!       ▼
//! ┌──────────────────────┐
//! │  Gaia tool gateway   │
//! │  1. Check API key    │  ← auth
//! │  2. Look up tool     │  ← tools / definitions
//! │  3. Validate args    │  ← validator (JSON Schema)
//! │  4. Decode request   │  ← request
//! │  5. Dispatch         │  ← executor → gaia-scheduling
//! └──────────┬───────────┘
//!            │
//!            ▼
//!   Supabase functions + REST
//! ```
//!
//! ## Error mapping
//!
//! | Error | Status |
//! |-------|--------|
//! | missing/wrong API key | 401 |
//! | unknown tool | 404 |
//! | body not JSON, schema violation, bad date, inverted window | 400 |
//! | handler failure | 500 |
//!
//! Every error body is `{ "error": "<message>" }`.

pub mod auth;
pub mod definitions;
pub mod error;
pub mod executor;
pub mod http_transport;
pub mod protocol;
pub mod request;
pub mod tools;
pub mod validator;

pub use auth::ApiKeyAuth;
pub use definitions::{builtin_registry, builtin_tools};
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use http_transport::{HttpServer, create_router};
pub use protocol::{ListToolsResponse, ToolAnnotations, ToolDefinition};
pub use request::ToolRequest;
pub use tools::ToolRegistry;
pub use validator::ArgumentValidator;
