use gaia_core::{AvailabilityConfig, GaiaConfig, PatientApiConfig, StoreConfig, UpstreamConfig};
use gaia_scheduling::UpstreamError;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors raised while building a [`SupabaseClient`].
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("upstream URL is not configured (set {0} or upstream.url)")]
    MissingUrl(String),

    #[error("upstream service key is not configured (set {0} or upstream.service_key)")]
    MissingServiceKey(String),

    #[error("invalid upstream URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP client for one Supabase project.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
    service_key: String,
    pub(crate) availability_function: String,
    pub(crate) doctor_schedule_function: String,
    pub(crate) patients: PatientApiConfig,
}

impl SupabaseClient {
    /// Build a client, resolving the URL and service key from config/env.
    pub fn new(
        upstream: &UpstreamConfig,
        availability: &AvailabilityConfig,
        store: &StoreConfig,
        patients: &PatientApiConfig,
    ) -> Result<Self, SupabaseError> {
        let base_url = upstream.resolve_url().ok_or_else(|| {
            SupabaseError::MissingUrl(upstream.url_env.clone().unwrap_or_default())
        })?;
        Url::parse(&base_url).map_err(|e| SupabaseError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        let service_key = upstream.resolve_service_key().ok_or_else(|| {
            SupabaseError::MissingServiceKey(upstream.service_key_env.clone().unwrap_or_default())
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = upstream.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        tracing::debug!(url = %base_url, timeout_seconds = ?upstream.timeout_seconds, "Supabase client configured");

        Ok(Self {
            http: builder.build()?,
            base_url,
            service_key,
            availability_function: availability.function.clone(),
            doctor_schedule_function: store.doctor_schedule_function.clone(),
            patients: patients.clone(),
        })
    }

    /// Build a client from the full gateway configuration.
    pub fn from_config(config: &GaiaConfig) -> Result<Self, SupabaseError> {
        Self::new(
            &config.upstream,
            &config.availability,
            &config.store,
            &config.patients,
        )
    }

    /// Project base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, name.trim_start_matches('/'))
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Request with the service key attached.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }

    /// `GET /functions/v1/<name>?<query>` and decode the JSON body.
    pub(crate) async fn invoke_function(
        &self,
        name: &str,
        query: &[(&str, String)],
    ) -> Result<Value, UpstreamError> {
        let url = self.function_url(name);
        tracing::debug!(function = name, "Invoking edge function");

        let response = self
            .request(Method::GET, &url)
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }
}

pub(crate) fn transport(err: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport(err.to_string())
}

/// Map a response to its JSON body, or to a status error carrying the body text.
///
/// An empty success body decodes to `null`.
pub(crate) async fn read_json(response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "Upstream returned error status");
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await.map_err(transport)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(url: &str) -> UpstreamConfig {
        UpstreamConfig {
            url: Some(url.to_string()),
            url_env: None,
            service_key: Some("service-key".to_string()),
            service_key_env: None,
            timeout_seconds: Some(5),
        }
    }

    fn client(url: &str) -> Result<SupabaseClient, SupabaseError> {
        SupabaseClient::new(
            &upstream(url),
            &AvailabilityConfig::default(),
            &StoreConfig::default(),
            &PatientApiConfig::default(),
        )
    }

    #[test]
    fn test_urls() {
        let client = client("https://project.supabase.co/").unwrap();
        assert_eq!(client.base_url(), "https://project.supabase.co");
        assert_eq!(
            client.function_url("availability-api"),
            "https://project.supabase.co/functions/v1/availability-api"
        );
        assert_eq!(
            client.rest_url("agendamentos"),
            "https://project.supabase.co/rest/v1/agendamentos"
        );
    }

    #[test]
    fn test_missing_url() {
        let mut config = upstream("");
        config.url = None;
        let err = SupabaseClient::new(
            &config,
            &AvailabilityConfig::default(),
            &StoreConfig::default(),
            &PatientApiConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SupabaseError::MissingUrl(_)));
    }

    #[test]
    fn test_missing_service_key() {
        let mut config = upstream("https://project.supabase.co");
        config.service_key = None;
        let err = SupabaseClient::new(
            &config,
            &AvailabilityConfig::default(),
            &StoreConfig::default(),
            &PatientApiConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SupabaseError::MissingServiceKey(_)));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            client("not a url"),
            Err(SupabaseError::InvalidUrl { .. })
        ));
    }
}
