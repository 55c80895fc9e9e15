//! Availability query and decision types.
//!
//! These are the only values the availability resolver owns. A query comes in
//! from a tool call, the upstream service answers with slots, and a decision
//! goes back out. Nothing here is persisted.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// DATE BOUNDS
// =============================================================================

/// One end of a query window, as the caller wrote it.
///
/// Callers send plain dates (`2025-12-08`), local timestamps
/// (`2025-12-18T09:00:00`) or timestamps with an offset
/// (`2025-12-08T00:00:00-03:00`). The textual class is kept so the value is
/// forwarded upstream in the same form it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Date(NaiveDate),
    Local(NaiveDateTime),
    Instant(DateTime<FixedOffset>),
}

/// A date bound could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date '{0}': expected YYYY-MM-DD or an ISO 8601 timestamp")]
pub struct DateBoundError(pub String);

impl DateBound {
    /// Date portion as written, time of day discarded.
    pub fn calendar_date(&self) -> NaiveDate {
        match self {
            DateBound::Date(d) => *d,
            DateBound::Local(dt) => dt.date(),
            DateBound::Instant(dt) => dt.date_naive(),
        }
    }

    /// Whole minutes from `self` to `later` (negative when `later` is earlier).
    ///
    /// Exact when both bounds carry an offset; otherwise wall-clock times are
    /// compared as written.
    pub fn minutes_until(&self, later: &DateBound) -> i64 {
        match (self, later) {
            (DateBound::Instant(a), DateBound::Instant(b)) => (*b - *a).num_minutes(),
            _ => (later.naive_local() - self.naive_local()).num_minutes(),
        }
    }

    fn naive_local(&self) -> NaiveDateTime {
        match self {
            DateBound::Date(d) => d.and_time(chrono::NaiveTime::MIN),
            DateBound::Local(dt) => *dt,
            DateBound::Instant(dt) => dt.naive_local(),
        }
    }
}

impl FromStr for DateBound {
    type Err = DateBoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(DateBound::Instant(dt));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(DateBound::Local(dt));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateBound::Date)
            .map_err(|_| DateBoundError(s.to_string()))
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBound::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DateBound::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            DateBound::Instant(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl Serialize for DateBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateBound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// "Is this doctor free at this branch between these bounds?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub doctor_id: String,
    pub branch_id: String,
    pub date_from: DateBound,
    pub date_to: DateBound,
}

impl AvailabilityQuery {
    /// Whether `date_from` does not come after `date_to`.
    ///
    /// Two offset timestamps compare as instants, two timestamps without
    /// offsets compare as local date-times, and anything involving a plain
    /// date compares calendar dates.
    pub fn is_ordered(&self) -> bool {
        match (&self.date_from, &self.date_to) {
            (DateBound::Instant(from), DateBound::Instant(to)) => from <= to,
            (DateBound::Date(_), _) | (_, DateBound::Date(_)) => {
                self.date_from.calendar_date() <= self.date_to.calendar_date()
            }
            (from, to) => from.naive_local() <= to.naive_local(),
        }
    }

    /// Query-string parameters understood by the availability service.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("doctor_id", self.doctor_id.clone()),
            ("branch_id", self.branch_id.clone()),
            ("date_from", self.date_from.to_string()),
            ("date_to", self.date_to.to_string()),
        ]
    }
}

// =============================================================================
// UPSTREAM RESPONSE
// =============================================================================

/// An open interval as returned by the availability service.
///
/// Times are passed through untouched: whatever the service put in `start`
/// and `end` (string, number, null) is what the caller sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub start: Value,
    #[serde(default)]
    pub end: Value,
}

impl Slot {
    /// Read one list element; a missing `start` or `end` becomes null.
    pub fn from_element(element: &Value) -> Self {
        Self {
            start: element.get("start").cloned().unwrap_or(Value::Null),
            end: element.get("end").cloned().unwrap_or(Value::Null),
        }
    }
}

/// Shapes the availability service is known to answer with.
///
/// Anything that is neither `{ "availability": [...] }` nor a bare list lands
/// in `Unrecognized` and counts as zero slots. Only the list itself decides
/// emptiness; irregular elements still count.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AvailabilityPayload {
    Wrapped { availability: Vec<Value> },
    Bare(Vec<Value>),
    Unrecognized(Value),
}

impl AvailabilityPayload {
    /// Classify a raw response body.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or(AvailabilityPayload::Unrecognized(Value::Null))
    }

    /// Slots in upstream order; empty for unrecognized shapes.
    pub fn into_slots(self) -> Vec<Slot> {
        let elements = match self {
            AvailabilityPayload::Wrapped { availability } => availability,
            AvailabilityPayload::Bare(elements) => elements,
            AvailabilityPayload::Unrecognized(_) => Vec::new(),
        };
        elements.iter().map(Slot::from_element).collect()
    }
}

// =============================================================================
// DECISION
// =============================================================================

/// Outcome class of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionStatus {
    /// Slots exist inside the requested window.
    #[serde(rename = "AVAILABLE")]
    Available,
    /// None in the window, but the fallback search found one.
    #[serde(rename = "UNAVAILABLE_IN_RANGE")]
    UnavailableInRange,
    /// Nothing in the window or the fallback horizon.
    #[serde(rename = "BLOCKED_90D")]
    Blocked90d,
    /// The fallback search itself failed.
    #[serde(rename = "ERROR")]
    Error,
}

/// The window the caller asked about, echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueriedRange {
    pub date_from: DateBound,
    pub date_to: DateBound,
}

/// First slot of a decision, relabelled for callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSlot {
    pub local_start: Value,
    pub local_end: Value,
}

impl From<Slot> for DecisionSlot {
    fn from(slot: Slot) -> Self {
        Self {
            local_start: slot.start,
            local_end: slot.end,
        }
    }
}

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDecision {
    pub status: DecisionStatus,
    pub branch_id: String,
    pub doctor_id: String,
    pub queried_range: QueriedRange,
    pub first_slot: Option<DecisionSlot>,
    pub note: String,
}

impl AvailabilityDecision {
    /// Build a decision for `query`; the queried range is always the
    /// caller's original window.
    pub fn new(
        query: &AvailabilityQuery,
        status: DecisionStatus,
        first_slot: Option<Slot>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            status,
            branch_id: query.branch_id.clone(),
            doctor_id: query.doctor_id.clone(),
            queried_range: QueriedRange {
                date_from: query.date_from,
                date_to: query.date_to,
            },
            first_slot: first_slot.map(DecisionSlot::from),
            note: note.into(),
        }
    }
}
