//! Configuration types for the Gaia tool gateway.
//!
//! A single YAML file (default `gaia.yaml`) is loaded once at startup into a
//! `GaiaConfig` and handed to every component that needs it. Nothing reads
//! process state after that point; secrets are referenced through `*_env`
//! fields and resolved at construction time.
//!
//! # Sections
//!
//! - **server**: listener host/port
//! - **auth**: shared-secret API key
//! - **upstream**: Supabase project URL, service key, optional timeout
//! - **availability**: availability function name and fallback horizon
//! - **store**: appointment table/column mapping and scheduling defaults
//! - **patients**: patient API paths and field names
//! - **logging**: output format

pub mod server;
pub mod store;
pub mod upstream;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use server::{AuthConfig, ServerConfig};
pub use store::{AppointmentColumns, PatientApiConfig, PatientFields, StatusValues, StoreConfig};
pub use upstream::UpstreamConfig;

/// Default configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "gaia.yaml";

/// Complete gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GaiaConfig {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,

    /// API key authentication.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Upstream project connection.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Availability lookups.
    #[serde(default)]
    pub availability: AvailabilityConfig,

    /// Appointment record mapping.
    #[serde(default)]
    pub store: StoreConfig,

    /// Patient API mapping.
    #[serde(default)]
    pub patients: PatientApiConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Availability lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    /// Edge function computing open slots.
    #[serde(default = "default_availability_function")]
    pub function: String,

    /// How many days from now the fallback search may look ahead.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            function: default_availability_function(),
            horizon_days: default_horizon_days(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable compact lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

fn default_availability_function() -> String {
    "availability-api".to_string()
}

fn default_horizon_days() -> u32 {
    90
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GaiaConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path, or from `gaia.yaml` when it
    /// exists, or fall back to the defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reject values that would make the gateway misbehave at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.availability.horizon_days == 0 {
            return Err(ConfigError::Config(
                "availability.horizon_days must be at least 1".to_string(),
            ));
        }
        if self.availability.function.trim().is_empty() {
            return Err(ConfigError::Config(
                "availability.function must not be empty".to_string(),
            ));
        }
        if self.store.appointments_table.trim().is_empty() {
            return Err(ConfigError::Config(
                "store.appointments_table must not be empty".to_string(),
            ));
        }
        if self.store.default_duration_minutes == 0 {
            return Err(ConfigError::Config(
                "store.default_duration_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = GaiaConfig::from_yaml("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.availability.horizon_days, 90);
        assert_eq!(config.availability.function, "availability-api");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = GaiaConfig::from_yaml(
            r#"
server:
  port: 8088
availability:
  horizon_days: 30
logging:
  format: json
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.availability.horizon_days, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_example_config_parses() {
        let config = GaiaConfig::from_yaml(include_str!("../../../../gaia.example.yaml")).unwrap();
        assert_eq!(config.store.appointments_table, "agendamentos");
        assert_eq!(config.upstream.url_env.as_deref(), Some("SUPABASE_URL"));
        assert_eq!(config.patients.fields.phone, "telefone");
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let err = GaiaConfig::from_yaml("availability:\n  horizon_days: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 4000").unwrap();

        let config = GaiaConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = GaiaConfig::load(Some(Path::new("/nonexistent/gaia.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
