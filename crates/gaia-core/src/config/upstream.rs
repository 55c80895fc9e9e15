//! Upstream Supabase project configuration.
//!
//! The gateway talks to a single project: edge functions for availability and
//! patient lookups, and the REST interface for appointment records. Both the
//! project URL and the service key can be given inline or through an
//! environment variable (the variable wins when set).

use serde::{Deserialize, Serialize};

/// Configuration for the upstream project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Environment variable containing the project URL.
    #[serde(default = "default_url_env", skip_serializing_if = "Option::is_none")]
    pub url_env: Option<String>,

    /// Service role key (development only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,

    /// Environment variable containing the service role key.
    #[serde(
        default = "default_service_key_env",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_key_env: Option<String>,

    /// Per-request timeout. Unset means whatever the transport imposes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            url_env: default_url_env(),
            service_key: None,
            service_key_env: default_service_key_env(),
            timeout_seconds: None,
        }
    }
}

impl UpstreamConfig {
    /// Resolve the project URL with any trailing slash removed.
    ///
    /// Precedence:
    /// 1. url_env (environment variable)
    /// 2. url (inline)
    pub fn resolve_url(&self) -> Option<String> {
        resolve(self.url_env.as_deref(), self.url.as_deref())
            .map(|url| url.trim_end_matches('/').to_string())
    }

    /// Resolve the service key, checking service_key_env first.
    pub fn resolve_service_key(&self) -> Option<String> {
        resolve(self.service_key_env.as_deref(), self.service_key.as_deref())
    }

    /// Check if this configuration reads credentials from the environment.
    pub fn uses_env_credentials(&self) -> bool {
        self.url_env.is_some() || self.service_key_env.is_some()
    }
}

fn resolve(env_var: Option<&str>, inline: Option<&str>) -> Option<String> {
    if let Some(env_var) = env_var
        && let Ok(value) = std::env::var(env_var)
        && !value.is_empty()
    {
        return Some(value);
    }
    inline.filter(|v| !v.is_empty()).map(str::to_string)
}

fn default_url_env() -> Option<String> {
    Some("SUPABASE_URL".to_string())
}

fn default_service_key_env() -> Option<String> {
    Some("SUPABASE_SERVICE_ROLE_KEY".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_url_trailing_slash_removed() {
        let config = UpstreamConfig {
            url: Some("https://project.supabase.co/".to_string()),
            url_env: None,
            ..Default::default()
        };
        assert_eq!(
            config.resolve_url().as_deref(),
            Some("https://project.supabase.co")
        );
    }

    #[test]
    fn test_unset_env_falls_back_to_inline_key() {
        let config = UpstreamConfig {
            service_key: Some("service-key".to_string()),
            service_key_env: Some("GAIA_TEST_UNSET_SERVICE_KEY_VAR".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_service_key().as_deref(), Some("service-key"));
    }

    #[test]
    fn test_timeout_omitted_from_yaml_when_unset() {
        let yaml = serde_yaml::to_string(&UpstreamConfig::default()).unwrap();
        assert!(!yaml.contains("timeout_seconds"));
        assert!(yaml.contains("SUPABASE_URL"));
    }
}
