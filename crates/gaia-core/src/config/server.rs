//! HTTP server and authentication configuration.
//!
//! The gateway exposes tools over HTTP. Authentication is a single shared
//! secret: when a key is resolved, every tool request must present it.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address string, e.g. `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared-secret authentication for tool requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// API key provided inline (development only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable containing the API key. Takes precedence.
    #[serde(default = "default_api_key_env", skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl AuthConfig {
    /// Resolve the API key, checking `api_key_env` first.
    ///
    /// Returns `None` when no key is configured, which puts the gateway in
    /// open mode.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|k| !k.is_empty())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_key_env() -> Option<String> {
    Some("MCP_API_KEY".to_string())
}
