//! Record store mapping.
//!
//! The appointment records live in an external schema we do not own, so every
//! table, column and status value the gateway touches is named here rather
//! than in code. Defaults match the clinic schema the gateway was built for.

use serde::{Deserialize, Serialize};

/// Appointment table mapping and scheduling defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Appointments table name.
    #[serde(default = "default_appointments_table")]
    pub appointments_table: String,

    /// Column names in the appointments table.
    #[serde(default)]
    pub columns: AppointmentColumns,

    /// Status values written and compared against.
    #[serde(default)]
    pub statuses: StatusValues,

    /// Projection used when listing appointments (may embed related rows).
    #[serde(default = "default_list_select")]
    pub list_select: String,

    /// Duration in minutes when a schedule request does not give one.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,

    /// Appointment type when a schedule request does not give one.
    #[serde(default = "default_appointment_type")]
    pub default_appointment_type: String,

    /// Notes written when a schedule request does not give any.
    #[serde(default = "default_note")]
    pub default_note: String,

    /// Edge function path for a doctor's schedule; `{doctor_id}` is substituted.
    #[serde(default = "default_doctor_schedule_function")]
    pub doctor_schedule_function: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            appointments_table: default_appointments_table(),
            columns: AppointmentColumns::default(),
            statuses: StatusValues::default(),
            list_select: default_list_select(),
            default_duration_minutes: default_duration_minutes(),
            default_appointment_type: default_appointment_type(),
            default_note: default_note(),
            doctor_schedule_function: default_doctor_schedule_function(),
        }
    }
}

impl StoreConfig {
    /// Function path for the given doctor's schedule.
    pub fn doctor_schedule_path(&self, doctor_id: &str) -> String {
        self.doctor_schedule_function.replace("{doctor_id}", doctor_id)
    }
}

/// Column names of the appointments table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentColumns {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub branch_id: String,
    pub organization_id: String,
    pub starts_at: String,
    pub duration_minutes: String,
    pub notes: String,
    pub status: String,
    pub appointment_type: String,
}

impl Default for AppointmentColumns {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            patient_id: "paciente_id".to_string(),
            doctor_id: "medico_id".to_string(),
            branch_id: "filial_id".to_string(),
            organization_id: "organizacao_id".to_string(),
            starts_at: "data_hora".to_string(),
            duration_minutes: "duracao_minutos".to_string(),
            notes: "observacoes".to_string(),
            status: "status".to_string(),
            appointment_type: "tipo_consulta".to_string(),
        }
    }
}

/// Appointment status values as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusValues {
    pub scheduled: String,
    pub cancelled: String,
}

impl Default for StatusValues {
    fn default() -> Self {
        Self {
            scheduled: "agendado".to_string(),
            cancelled: "cancelado".to_string(),
        }
    }
}

/// Patient API endpoints and wire field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientApiConfig {
    /// Function path for phone lookups.
    pub search_by_phone_function: String,
    /// Function path for CPF and name lookups.
    pub search_function: String,
    /// Function path for patient creation.
    pub create_function: String,
    /// Wire field names shared by search and create.
    pub fields: PatientFields,
}

impl Default for PatientApiConfig {
    fn default() -> Self {
        Self {
            search_by_phone_function: "patients-api/search-by-phone".to_string(),
            search_function: "patients-api/search".to_string(),
            create_function: "patients-api/create".to_string(),
            fields: PatientFields::default(),
        }
    }
}

/// Field names used by the patient API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientFields {
    pub organization_id: String,
    pub full_name: String,
    pub phone: String,
    pub cpf: String,
    pub email: String,
    /// Free-text query parameter of the generic search.
    pub query: String,
    /// Parameter selecting the generic search type (`cpf` or `name`).
    pub search_type: String,
}

impl Default for PatientFields {
    fn default() -> Self {
        Self {
            organization_id: "organizacao_id".to_string(),
            full_name: "nome_completo".to_string(),
            phone: "telefone".to_string(),
            cpf: "cpf".to_string(),
            email: "email".to_string(),
            query: "q".to_string(),
            search_type: "search_type".to_string(),
        }
    }
}

fn default_appointments_table() -> String {
    "agendamentos".to_string()
}

fn default_list_select() -> String {
    "*, pacientes ( nome_completo ), medicos ( nome_completo )".to_string()
}

fn default_duration_minutes() -> u32 {
    60
}

fn default_appointment_type() -> String {
    "presencial".to_string()
}

fn default_note() -> String {
    "Appointment created via tool gateway".to_string()
}

fn default_doctor_schedule_function() -> String {
    "doctors-api/{doctor_id}/schedule".to_string()
}
