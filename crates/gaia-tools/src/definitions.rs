//! Built-in tool descriptors.
//!
//! These are the published contracts: `GET /tools` returns them verbatim and
//! every call is validated against the matching `inputSchema`.

use crate::protocol::{ToolAnnotations, ToolDefinition};
use crate::tools::ToolRegistry;
use serde_json::json;

pub const SCHEDULE_APPOINTMENT: &str = "schedule_appointment";
pub const LIST_APPOINTMENTS: &str = "list_appointments";
pub const CHECK_AVAILABILITY: &str = "check_availability";
pub const CANCEL_APPOINTMENT: &str = "cancel_appointment";
pub const UPDATE_APPOINTMENT: &str = "update_appointment";
pub const GET_OR_CREATE_PATIENT: &str = "get_or_create_patient";

/// Registry holding the six scheduling tools in publication order.
pub fn builtin_registry() -> ToolRegistry {
    builtin_tools().into_iter().collect()
}

/// The six scheduling tools in publication order.
pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        schedule_appointment(),
        list_appointments(),
        check_availability(),
        cancel_appointment(),
        update_appointment(),
        get_or_create_patient(),
    ]
}

fn read_only() -> Option<ToolAnnotations> {
    Some(ToolAnnotations {
        read_only: Some(true),
    })
}

fn schedule_appointment() -> ToolDefinition {
    ToolDefinition {
        name: SCHEDULE_APPOINTMENT.to_string(),
        description: Some("Schedule a new appointment".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "patient_id": { "type": "string", "description": "UUID of the patient" },
                "doctor_id": { "type": "string", "description": "UUID of the doctor" },
                "date": { "type": "string", "description": "ISO 8601 start date timestamp" },
                "duration": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Duration in minutes (optional, defaults to 60)"
                },
                "notes": { "type": "string", "description": "Optional notes" },
                "organization_id": { "type": "string", "description": "Organization ID (Required)" },
                "branch_id": { "type": "string", "description": "Branch ID (Required)" },
                "appointment_type": {
                    "type": "string",
                    "description": "Type of appointment: presencial, online, etc."
                },
                "request_reason": { "type": "string", "description": "Reason given for the request" },
                "session_id": { "type": "string", "description": "Session or phone identifier" }
            },
            "required": ["patient_id", "doctor_id", "date", "organization_id", "branch_id"]
        }),
        annotations: None,
    }
}

fn list_appointments() -> ToolDefinition {
    ToolDefinition {
        name: LIST_APPOINTMENTS.to_string(),
        description: Some("List appointments with optional filters".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "doctor_id": { "type": "string" },
                "patient_id": { "type": "string" },
                "date": { "type": "string", "description": "Date in YYYY-MM-DD format" },
                "status_filter": {
                    "type": "string",
                    "enum": ["active", "history"],
                    "description": "Filter active or historical appointments"
                }
            }
        }),
        annotations: read_only(),
    }
}

fn check_availability() -> ToolDefinition {
    ToolDefinition {
        name: CHECK_AVAILABILITY.to_string(),
        description: Some(
            "Check availability using the specialized Edge Function rules (blocked slots, shifts, etc.)"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "doctor_id": { "type": "string", "description": "Doctor ID" },
                "branch_id": { "type": "string", "description": "Branch ID" },
                "date_from": { "type": "string", "description": "Start of the window (ISO or YYYY-MM-DD)" },
                "date_to": { "type": "string", "description": "End of the window (ISO or YYYY-MM-DD)" }
            },
            "required": ["doctor_id", "branch_id", "date_from", "date_to"]
        }),
        annotations: read_only(),
    }
}

fn cancel_appointment() -> ToolDefinition {
    ToolDefinition {
        name: CANCEL_APPOINTMENT.to_string(),
        description: Some("Cancel an appointment".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "appointment_id": { "type": "string" },
                "reason": { "type": "string" }
            },
            "required": ["appointment_id"]
        }),
        annotations: None,
    }
}

fn update_appointment() -> ToolDefinition {
    ToolDefinition {
        name: UPDATE_APPOINTMENT.to_string(),
        description: Some("Update an existing appointment".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "appointment_id": { "type": "string" },
                "start_time": { "type": "string" },
                "end_time": { "type": "string" },
                "notes": { "type": "string" }
            },
            "required": ["appointment_id"]
        }),
        annotations: None,
    }
}

fn get_or_create_patient() -> ToolDefinition {
    ToolDefinition {
        name: GET_OR_CREATE_PATIENT.to_string(),
        description: Some(
            "Search for a patient by Phone or CPF. If not found, create a new one automatically."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "phone": { "type": "string", "description": "Patient phone number" },
                "cpf": { "type": "string", "description": "Patient CPF" },
                "name": { "type": "string", "description": "Patient Full Name (Required for creation)" },
                "email": { "type": "string", "description": "Patient email (optional)" },
                "organization_id": { "type": "string", "description": "Organization ID (Required)" }
            },
            "required": ["name", "organization_id"]
        }),
        annotations: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_order() {
        assert_eq!(
            builtin_registry().names(),
            vec![
                SCHEDULE_APPOINTMENT,
                LIST_APPOINTMENTS,
                CHECK_AVAILABILITY,
                CANCEL_APPOINTMENT,
                UPDATE_APPOINTMENT,
                GET_OR_CREATE_PATIENT,
            ]
        );
    }

    #[test]
    fn test_schemas_compile() {
        for tool in builtin_tools() {
            assert!(
                jsonschema::validator_for(&tool.input_schema).is_ok(),
                "schema of {} must compile",
                tool.name
            );
        }
    }

    #[test]
    fn test_check_availability_required_fields() {
        let tool = check_availability();
        assert_eq!(
            tool.input_schema["required"],
            json!(["doctor_id", "branch_id", "date_from", "date_to"])
        );
    }
}
