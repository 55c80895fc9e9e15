//! Availability resolution with a bounded fallback search.
//!
//! One check issues at most two sequential lookups:
//!
//! ```text
//! primary window ──► slots? ── yes ──► AVAILABLE
//!        │              │
//!     failure           no
//!        │              ▼
//!        ▼     [date_to + 1 day, now + horizon] ──► slots? ── yes ──► UNAVAILABLE_IN_RANGE
//!  AvailabilityCheckFailed          │                    │
//!                                failure                 no
//!                                   ▼                    ▼
//!                                 ERROR              BLOCKED_90D
//! ```
//!
//! A primary failure aborts the call. A fallback failure degrades into an
//! `ERROR` decision, since the primary window is already known to be empty.
//!
//! The fallback end is anchored to the wall clock, not to the query, so the
//! total lookahead is capped no matter how far out the caller asked.

use crate::adapter::AvailabilityService;
use crate::clock::{Clock, SystemClock};
use crate::error::SchedulingError;
use chrono::{Days, NaiveDate};
use gaia_core::{
    AvailabilityConfig, AvailabilityDecision, AvailabilityPayload, AvailabilityQuery, DateBound,
    DecisionStatus, Slot,
};
use serde_json::Value;
use std::sync::Arc;

const NOTE_IN_RANGE: &str = "Slots found in requested range.";
const NOTE_FALLBACK_FAILED: &str = "Failed to execute fallback search.";

/// Answers availability queries against an [`AvailabilityService`].
///
/// Holds no per-query state; concurrent checks are independent.
pub struct AvailabilityResolver {
    service: Arc<dyn AvailabilityService>,
    clock: Arc<dyn Clock>,
    horizon_days: u32,
}

impl AvailabilityResolver {
    /// Create a resolver using the system clock.
    pub fn new(service: Arc<dyn AvailabilityService>, config: &AvailabilityConfig) -> Self {
        Self {
            service,
            clock: Arc::new(SystemClock),
            horizon_days: config.horizon_days,
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Fallback horizon in days.
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Window searched when the requested one has no slots.
    ///
    /// The window may come out inverted when the query already ends past the
    /// horizon; it is sent as-is and the service answers with no slots.
    pub fn fallback_query(&self, query: &AvailabilityQuery) -> AvailabilityQuery {
        let last_day = query.date_to.calendar_date();
        let fallback_from = last_day.succ_opt().unwrap_or(NaiveDate::MAX);
        let fallback_to = self
            .clock
            .now()
            .date_naive()
            .checked_add_days(Days::new(u64::from(self.horizon_days)))
            .unwrap_or(NaiveDate::MAX);

        AvailabilityQuery {
            doctor_id: query.doctor_id.clone(),
            branch_id: query.branch_id.clone(),
            date_from: DateBound::Date(fallback_from),
            date_to: DateBound::Date(fallback_to),
        }
    }

    /// Resolve a query into a decision.
    ///
    /// Errors only when the window is inverted or the primary lookup fails.
    pub async fn check(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityDecision, SchedulingError> {
        if !query.is_ordered() {
            return Err(SchedulingError::InvalidWindow {
                date_from: query.date_from.to_string(),
                date_to: query.date_to.to_string(),
            });
        }

        tracing::info!(
            doctor_id = %query.doctor_id,
            branch_id = %query.branch_id,
            date_from = %query.date_from,
            date_to = %query.date_to,
            "Checking availability"
        );

        let primary = self.service.fetch_availability(query).await.map_err(|e| {
            tracing::error!(error = %e, "Primary availability lookup failed");
            SchedulingError::AvailabilityCheckFailed(e.to_string())
        })?;

        if let Some(slot) = first_slot(primary) {
            return Ok(AvailabilityDecision::new(
                query,
                DecisionStatus::Available,
                Some(slot),
                NOTE_IN_RANGE,
            ));
        }

        let fallback = self.fallback_query(query);
        tracing::info!(
            date_from = %fallback.date_from,
            date_to = %fallback.date_to,
            horizon_days = self.horizon_days,
            "No slots in requested range, searching fallback window"
        );

        let body = match self.service.fetch_availability(&fallback).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Fallback availability lookup failed");
                return Ok(AvailabilityDecision::new(
                    query,
                    DecisionStatus::Error,
                    None,
                    NOTE_FALLBACK_FAILED,
                ));
            }
        };

        Ok(match first_slot(body) {
            Some(slot) => AvailabilityDecision::new(
                query,
                DecisionStatus::UnavailableInRange,
                Some(slot),
                format!("Found availability in next {} days.", self.horizon_days),
            ),
            None => AvailabilityDecision::new(
                query,
                DecisionStatus::Blocked90d,
                None,
                format!("No availability found in the next {} days.", self.horizon_days),
            ),
        })
    }
}

fn first_slot(body: Value) -> Option<Slot> {
    AvailabilityPayload::from_value(body)
        .into_slots()
        .into_iter()
        .next()
}
