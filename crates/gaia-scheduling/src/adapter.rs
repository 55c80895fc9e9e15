//! Collaborator boundaries.
//!
//! The scheduling operations never talk to the network themselves. They are
//! written against these traits, and an adapter crate supplies the
//! implementation for a concrete backend.

use crate::patients::{NewPatient, PatientLookup};
use async_trait::async_trait;
use gaia_core::AvailabilityQuery;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failure talking to an upstream system.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not what we expected.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Whether the upstream reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::Status { status: 404, .. })
    }
}

// =============================================================================
// RECORD QUERIES
// =============================================================================

/// Comparison operator of a record filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gte,
    Lt,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
        }
    }
}

/// `column <op> value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Eq, value)
    }

    pub fn neq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Neq, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Gte, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Lt, value)
    }
}

/// Sort order of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A filtered, ordered read from one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    /// Projection, e.g. `*` or `status,data_hora`.
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<u32>,
}

impl SelectQuery {
    pub fn new(columns: impl Into<String>) -> Self {
        Self {
            columns: columns.into(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Computes open slots for a doctor at a branch.
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Raw response body for the query window.
    async fn fetch_availability(&self, query: &AvailabilityQuery) -> Result<Value, UpstreamError>;
}

/// Record-oriented access to the relational store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one row and return it as stored.
    async fn insert(&self, table: &str, row: Map<String, Value>) -> Result<Value, UpstreamError>;

    /// Read rows matching the query.
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, UpstreamError>;

    /// Apply `patch` to every row matching `filters`; returns the updated rows.
    async fn update(
        &self,
        table: &str,
        patch: Map<String, Value>,
        filters: &[Filter],
    ) -> Result<Vec<Value>, UpstreamError>;
}

/// A doctor's agenda as computed upstream.
#[async_trait]
pub trait DoctorSchedule: Send + Sync {
    async fn doctor_schedule(
        &self,
        doctor_id: &str,
        date: Option<&str>,
    ) -> Result<Value, UpstreamError>;
}

/// Patient search and registration.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    /// Raw search response for one lookup key.
    async fn search_patient(
        &self,
        organization_id: &str,
        lookup: &PatientLookup,
    ) -> Result<Value, UpstreamError>;

    /// Register a patient and return the created record.
    async fn create_patient(&self, patient: &NewPatient) -> Result<Value, UpstreamError>;
}
