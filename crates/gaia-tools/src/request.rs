//! Typed tool requests.
//!
//! Arguments are only turned into these after schema validation, so a
//! deserialisation failure here means a value passed the schema but is still
//! unusable (a malformed date, for instance).

use crate::definitions::{
    CANCEL_APPOINTMENT, CHECK_AVAILABILITY, GET_OR_CREATE_PATIENT, LIST_APPOINTMENTS,
    SCHEDULE_APPOINTMENT, UPDATE_APPOINTMENT,
};
use crate::error::ToolError;
use gaia_core::AvailabilityQuery;
use gaia_scheduling::{
    CancelAppointment, GetOrCreatePatient, ListAppointments, ScheduleAppointment,
    UpdateAppointment,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One call of a built-in tool.
#[derive(Debug, Clone)]
pub enum ToolRequest {
    ScheduleAppointment(ScheduleAppointment),
    ListAppointments(ListAppointments),
    CheckAvailability(AvailabilityQuery),
    CancelAppointment(CancelAppointment),
    UpdateAppointment(UpdateAppointment),
    GetOrCreatePatient(GetOrCreatePatient),
}

impl ToolRequest {
    /// Decode `arguments` for the named tool.
    pub fn parse(tool: &str, arguments: Value) -> Result<Self, ToolError> {
        let request = match tool {
            SCHEDULE_APPOINTMENT => ToolRequest::ScheduleAppointment(decode(tool, arguments)?),
            LIST_APPOINTMENTS => ToolRequest::ListAppointments(decode(tool, arguments)?),
            CHECK_AVAILABILITY => ToolRequest::CheckAvailability(decode(tool, arguments)?),
            CANCEL_APPOINTMENT => ToolRequest::CancelAppointment(decode(tool, arguments)?),
            UPDATE_APPOINTMENT => ToolRequest::UpdateAppointment(decode(tool, arguments)?),
            GET_OR_CREATE_PATIENT => ToolRequest::GetOrCreatePatient(decode(tool, arguments)?),
            _ => {
                return Err(ToolError::ToolNotFound {
                    name: tool.to_string(),
                });
            }
        };
        Ok(request)
    }

    /// Name of the tool this request calls.
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolRequest::ScheduleAppointment(_) => SCHEDULE_APPOINTMENT,
            ToolRequest::ListAppointments(_) => LIST_APPOINTMENTS,
            ToolRequest::CheckAvailability(_) => CHECK_AVAILABILITY,
            ToolRequest::CancelAppointment(_) => CANCEL_APPOINTMENT,
            ToolRequest::UpdateAppointment(_) => UPDATE_APPOINTMENT,
            ToolRequest::GetOrCreatePatient(_) => GET_OR_CREATE_PATIENT,
        }
    }
}

fn decode<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}
