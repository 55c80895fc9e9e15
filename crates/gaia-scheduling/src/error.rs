//! Error types for scheduling operations.

use thiserror::Error;

/// Errors returned by the scheduling operations.
///
/// Every variant carries a message meant for the tool caller; the gateway
/// forwards `to_string()` as the error body.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// The primary availability lookup failed. No fallback is attempted.
    #[error("Availability Check Failed: {0}")]
    AvailabilityCheckFailed(String),

    /// The query window ends before it starts.
    #[error("invalid availability window: date_from {date_from} is after date_to {date_to}")]
    InvalidWindow { date_from: String, date_to: String },

    /// Creating the appointment record failed.
    #[error("Failed to schedule appointment: {0}")]
    ScheduleFailed(String),

    /// Querying appointment records failed.
    #[error("Failed to list appointments: {0}")]
    ListFailed(String),

    /// Marking the appointment cancelled failed.
    #[error("Failed to cancel appointment: {0}")]
    CancelFailed(String),

    /// Writing appointment changes failed.
    #[error("Failed to update appointment: {0}")]
    UpdateFailed(String),

    /// No appointment with this id.
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    /// Cancelled appointments are immutable.
    #[error(
        "OPERATION BLOCKED: Cannot update a cancelled appointment. Please create a new one using schedule_appointment."
    )]
    UpdateBlocked,

    /// The patient API rejected the creation request.
    #[error("Failed to create patient: {0}")]
    PatientCreateFailed(String),

    /// Arguments are well-formed but semantically unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl SchedulingError {
    /// Whether the caller, not an upstream system, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SchedulingError::InvalidWindow { .. } | SchedulingError::InvalidInput(_)
        )
    }
}
