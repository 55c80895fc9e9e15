//! # gaia-core
//!
//! Configuration and shared domain types for the Gaia scheduling tool gateway.

// Configuration loaded once at startup and injected everywhere else
pub mod config;

// Availability query/decision types
pub mod availability;

pub use availability::{
    AvailabilityDecision, AvailabilityPayload, AvailabilityQuery, DateBound, DateBoundError,
    DecisionSlot, DecisionStatus, QueriedRange, Slot,
};
pub use config::{
    AuthConfig, AvailabilityConfig, ConfigError, GaiaConfig, LogFormat, LoggingConfig,
    PatientApiConfig, ServerConfig, StoreConfig, UpstreamConfig,
};
