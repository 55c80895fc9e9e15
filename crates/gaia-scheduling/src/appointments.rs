//! Appointment operations over the record store.
//!
//! Column names and status values come from [`StoreConfig`]; nothing in here
//! spells out the upstream schema.

use crate::adapter::{DoctorSchedule, Filter, RecordStore, SelectQuery};
use crate::clock::{Clock, SystemClock};
use crate::error::SchedulingError;
use chrono::{Days, NaiveDate, NaiveTime, SecondsFormat};
use gaia_core::{DateBound, StoreConfig};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

// =============================================================================
// REQUESTS
// =============================================================================

/// Arguments of `schedule_appointment`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleAppointment {
    pub patient_id: String,
    pub doctor_id: String,
    pub organization_id: String,
    pub branch_id: String,
    /// Start of the appointment.
    pub date: DateBound,
    /// Length in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub appointment_type: Option<String>,
    /// Why the patient asked for the appointment.
    #[serde(default)]
    pub request_reason: Option<String>,
    /// Conversation the request came from.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Which appointments a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Upcoming and not cancelled.
    Active,
    /// Everything, newest first.
    History,
}

/// Arguments of `list_appointments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAppointments {
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status_filter: Option<StatusFilter>,
}

/// Arguments of `cancel_appointment`.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelAppointment {
    pub appointment_id: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Arguments of `update_appointment`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAppointment {
    pub appointment_id: String,
    #[serde(default)]
    pub start_time: Option<DateBound>,
    #[serde(default)]
    pub end_time: Option<DateBound>,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// SERVICE
// =============================================================================

/// Schedules, lists, cancels and reschedules appointments.
pub struct AppointmentService {
    store: Arc<dyn RecordStore>,
    doctor_schedule: Arc<dyn DoctorSchedule>,
    config: StoreConfig,
    clock: Arc<dyn Clock>,
}

impl AppointmentService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        doctor_schedule: Arc<dyn DoctorSchedule>,
        config: StoreConfig,
    ) -> Self {
        Self {
            store,
            doctor_schedule,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Insert a new appointment and return the stored record.
    pub async fn schedule(&self, request: &ScheduleAppointment) -> Result<Value, SchedulingError> {
        if request.duration == Some(0) {
            return Err(SchedulingError::InvalidInput(
                "duration must be at least one minute".to_string(),
            ));
        }

        let columns = &self.config.columns;
        let duration = request
            .duration
            .unwrap_or(self.config.default_duration_minutes);
        let appointment_type = non_empty(&request.appointment_type)
            .unwrap_or(&self.config.default_appointment_type);

        let mut row = Map::new();
        row.insert(columns.patient_id.clone(), json!(request.patient_id));
        row.insert(columns.doctor_id.clone(), json!(request.doctor_id));
        row.insert(columns.branch_id.clone(), json!(request.branch_id));
        row.insert(columns.organization_id.clone(), json!(request.organization_id));
        row.insert(columns.starts_at.clone(), json!(request.date.to_string()));
        row.insert(columns.duration_minutes.clone(), json!(duration));
        row.insert(columns.notes.clone(), json!(self.schedule_notes(request)));
        row.insert(columns.appointment_type.clone(), json!(appointment_type));
        row.insert(columns.status.clone(), json!(self.config.statuses.scheduled));

        tracing::info!(
            doctor_id = %request.doctor_id,
            patient_id = %request.patient_id,
            starts_at = %request.date,
            duration,
            "Scheduling appointment"
        );

        self.store
            .insert(&self.config.appointments_table, row)
            .await
            .map_err(|e| SchedulingError::ScheduleFailed(e.to_string()))
    }

    fn schedule_notes(&self, request: &ScheduleAppointment) -> String {
        let mut notes = non_empty(&request.notes)
            .unwrap_or(&self.config.default_note)
            .to_string();
        if let Some(reason) = non_empty(&request.request_reason) {
            notes.push_str(" | Request: ");
            notes.push_str(reason);
        }
        if let Some(session) = non_empty(&request.session_id) {
            notes.push_str(" | Session: ");
            notes.push_str(session);
        }
        notes
    }

    /// List appointments.
    ///
    /// With a doctor id the doctor's computed schedule is preferred; if that
    /// lookup fails the record store is queried instead.
    pub async fn list(&self, request: &ListAppointments) -> Result<Value, SchedulingError> {
        if let Some(doctor_id) = non_empty(&request.doctor_id) {
            let date = request.date.map(|d| d.format("%Y-%m-%d").to_string());
            match self.doctor_schedule.doctor_schedule(doctor_id, date.as_deref()).await {
                Ok(schedule) => return Ok(schedule),
                Err(e) => {
                    tracing::warn!(doctor_id, error = %e, "Doctor schedule lookup failed, querying records");
                }
            }
        }

        let query = self.list_query(request);
        let rows = self
            .store
            .select(&self.config.appointments_table, &query)
            .await
            .map_err(|e| SchedulingError::ListFailed(e.to_string()))?;

        tracing::debug!(count = rows.len(), "Listed appointments");
        Ok(Value::Array(rows))
    }

    fn list_query(&self, request: &ListAppointments) -> SelectQuery {
        let columns = &self.config.columns;
        let mut query = SelectQuery::new(self.config.list_select.clone());

        if let Some(doctor_id) = non_empty(&request.doctor_id) {
            query = query.filter(Filter::eq(&columns.doctor_id, doctor_id));
        }
        if let Some(patient_id) = non_empty(&request.patient_id) {
            query = query.filter(Filter::eq(&columns.patient_id, patient_id));
        }
        if let Some(date) = request.date {
            let next = date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
            query = query
                .filter(Filter::gte(&columns.starts_at, start_of_day(date)))
                .filter(Filter::lt(&columns.starts_at, start_of_day(next)));
        }

        if request.status_filter == Some(StatusFilter::Active) {
            let now = self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
            query
                .filter(Filter::neq(&columns.status, &self.config.statuses.cancelled))
                .filter(Filter::gte(&columns.starts_at, now))
                .order_by(&columns.starts_at, true)
        } else {
            query.order_by(&columns.starts_at, false)
        }
    }

    /// Mark an appointment cancelled and return the updated record.
    pub async fn cancel(&self, request: &CancelAppointment) -> Result<Value, SchedulingError> {
        let columns = &self.config.columns;

        let mut patch = Map::new();
        patch.insert(columns.status.clone(), json!(self.config.statuses.cancelled));
        if let Some(reason) = non_empty(&request.reason) {
            patch.insert(columns.notes.clone(), json!(format!("Cancelled: {reason}")));
        }

        tracing::info!(appointment_id = %request.appointment_id, "Cancelling appointment");

        let rows = self
            .store
            .update(
                &self.config.appointments_table,
                patch,
                &[Filter::eq(&columns.id, &request.appointment_id)],
            )
            .await
            .map_err(|e| SchedulingError::CancelFailed(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| SchedulingError::AppointmentNotFound(request.appointment_id.clone()))
    }

    /// Reschedule or annotate an appointment that is not cancelled.
    pub async fn update(&self, request: &UpdateAppointment) -> Result<Value, SchedulingError> {
        let notes = non_empty(&request.notes);
        if request.start_time.is_none() && request.end_time.is_none() && notes.is_none() {
            return Err(SchedulingError::InvalidInput(
                "nothing to update: provide start_time, end_time or notes".to_string(),
            ));
        }

        let columns = &self.config.columns;
        let current = self.current_record(&request.appointment_id).await?;

        let status = current.get(&columns.status).and_then(Value::as_str);
        if status == Some(self.config.statuses.cancelled.as_str()) {
            tracing::warn!(appointment_id = %request.appointment_id, "Refusing to update cancelled appointment");
            return Err(SchedulingError::UpdateBlocked);
        }

        let mut patch = Map::new();
        if let Some(notes) = notes {
            patch.insert(columns.notes.clone(), json!(notes));
        }

        match (&request.start_time, &request.end_time) {
            (Some(start), Some(end)) => {
                patch.insert(columns.starts_at.clone(), json!(start.to_string()));
                patch.insert(columns.duration_minutes.clone(), json!(duration_between(start, end)?));
            }
            (Some(start), None) => {
                patch.insert(columns.starts_at.clone(), json!(start.to_string()));
            }
            (None, Some(end)) => {
                let stored = current
                    .get(&columns.starts_at)
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        SchedulingError::UpdateFailed("stored appointment has no start time".to_string())
                    })?;
                let start: DateBound = stored.parse().map_err(|e| {
                    SchedulingError::UpdateFailed(format!("stored start time unreadable: {e}"))
                })?;
                patch.insert(columns.duration_minutes.clone(), json!(duration_between(&start, end)?));
            }
            (None, None) => {}
        }

        tracing::info!(appointment_id = %request.appointment_id, fields = patch.len(), "Updating appointment");

        let rows = self
            .store
            .update(
                &self.config.appointments_table,
                patch,
                &[Filter::eq(&columns.id, &request.appointment_id)],
            )
            .await
            .map_err(|e| SchedulingError::UpdateFailed(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| SchedulingError::AppointmentNotFound(request.appointment_id.clone()))
    }

    async fn current_record(&self, appointment_id: &str) -> Result<Value, SchedulingError> {
        let columns = &self.config.columns;
        let query = SelectQuery::new(format!("{},{}", columns.status, columns.starts_at))
            .filter(Filter::eq(&columns.id, appointment_id))
            .limit(1);

        let rows = self
            .store
            .select(&self.config.appointments_table, &query)
            .await
            .map_err(|e| SchedulingError::UpdateFailed(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| SchedulingError::AppointmentNotFound(appointment_id.to_string()))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn start_of_day(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn duration_between(start: &DateBound, end: &DateBound) -> Result<i64, SchedulingError> {
    let minutes = start.minutes_until(end);
    if minutes <= 0 {
        return Err(SchedulingError::InvalidInput(format!(
            "end_time {end} must be after start {start}"
        )));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{FilterOp, UpstreamError};
    use crate::clock::FixedClock;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        rows: Mutex<Vec<Value>>,
        fail: Option<UpstreamError>,
        inserts: Mutex<Vec<Map<String, Value>>>,
        selects: Mutex<Vec<SelectQuery>>,
        updates: Mutex<Vec<(Map<String, Value>, Vec<Filter>)>>,
    }

    impl FakeStore {
        fn with_rows(rows: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                rows: Mutex::new(rows),
                ..Default::default()
            })
        }

        fn failing(error: UpstreamError) -> Arc<Self> {
            Arc::new(Self {
                fail: Some(error),
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl RecordStore for FakeStore {
        async fn insert(&self, _table: &str, row: Map<String, Value>) -> Result<Value, UpstreamError> {
            self.inserts.lock().unwrap().push(row.clone());
            match &self.fail {
                Some(e) => Err(e.clone()),
                None => Ok(Value::Object(row)),
            }
        }

        async fn select(&self, _table: &str, query: &SelectQuery) -> Result<Vec<Value>, UpstreamError> {
            self.selects.lock().unwrap().push(query.clone());
            match &self.fail {
                Some(e) => Err(e.clone()),
                None => Ok(self.rows.lock().unwrap().clone()),
            }
        }

        async fn update(
            &self,
            _table: &str,
            patch: Map<String, Value>,
            filters: &[Filter],
        ) -> Result<Vec<Value>, UpstreamError> {
            self.updates
                .lock()
                .unwrap()
                .push((patch.clone(), filters.to_vec()));
            if let Some(e) = &self.fail {
                return Err(e.clone());
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .map(|row| {
                    let mut merged = row.as_object().cloned().unwrap_or_default();
                    merged.extend(patch.clone());
                    Value::Object(merged)
                })
                .collect())
        }
    }

    struct FakeSchedule(Result<Value, UpstreamError>);

    #[async_trait]
    impl DoctorSchedule for FakeSchedule {
        async fn doctor_schedule(&self, _doctor_id: &str, _date: Option<&str>) -> Result<Value, UpstreamError> {
            self.0.clone()
        }
    }

    fn unavailable_schedule() -> Arc<FakeSchedule> {
        Arc::new(FakeSchedule(Err(UpstreamError::Status {
            status: 500,
            body: "boom".to_string(),
        })))
    }

    fn service(store: Arc<FakeStore>, schedule: Arc<FakeSchedule>) -> AppointmentService {
        let now = Utc.with_ymd_and_hms(2025, 12, 1, 15, 0, 0).unwrap();
        AppointmentService::new(store, schedule, StoreConfig::default())
            .with_clock(Arc::new(FixedClock(now)))
    }

    fn schedule_request() -> ScheduleAppointment {
        serde_json::from_value(json!({
            "patient_id": "p-1",
            "doctor_id": "d-1",
            "organization_id": "org-1",
            "branch_id": "b-1",
            "date": "2025-12-18T09:00:00-03:00"
        }))
        .unwrap()
    }

    fn stored(status: &str) -> Value {
        json!({"id": "a-1", "status": status, "data_hora": "2025-12-18T12:00:00+00:00"})
    }

    #[tokio::test]
    async fn test_schedule_applies_defaults() {
        let store = FakeStore::with_rows(vec![]);
        let created = service(store.clone(), unavailable_schedule())
            .schedule(&schedule_request())
            .await
            .unwrap();

        assert_eq!(created["paciente_id"], "p-1");
        assert_eq!(created["medico_id"], "d-1");
        assert_eq!(created["filial_id"], "b-1");
        assert_eq!(created["organizacao_id"], "org-1");
        assert_eq!(created["data_hora"], "2025-12-18T09:00:00-03:00");
        assert_eq!(created["duracao_minutos"], 60);
        assert_eq!(created["observacoes"], "Appointment created via tool gateway");
        assert_eq!(created["tipo_consulta"], "presencial");
        assert_eq!(created["status"], "agendado");
        assert_eq!(store.inserts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_schedule_note_suffixes() {
        let mut request = schedule_request();
        request.notes = Some("Retorno".to_string());
        request.request_reason = Some("dor de cabeca".to_string());
        request.session_id = Some("s-42".to_string());
        request.duration = Some(30);

        let created = service(FakeStore::with_rows(vec![]), unavailable_schedule())
            .schedule(&request)
            .await
            .unwrap();

        assert_eq!(
            created["observacoes"],
            "Retorno | Request: dor de cabeca | Session: s-42"
        );
        assert_eq!(created["duracao_minutos"], 30);
    }

    #[tokio::test]
    async fn test_schedule_store_failure() {
        let store = FakeStore::failing(UpstreamError::Status {
            status: 409,
            body: "duplicate".to_string(),
        });
        let err = service(store, unavailable_schedule())
            .schedule(&schedule_request())
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulingError::ScheduleFailed(_)));
        assert!(err.to_string().starts_with("Failed to schedule appointment:"));
    }

    #[tokio::test]
    async fn test_schedule_rejects_zero_duration() {
        let mut request = schedule_request();
        request.duration = Some(0);
        let store = FakeStore::with_rows(vec![]);

        let err = service(store.clone(), unavailable_schedule())
            .schedule(&request)
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(store.inserts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_prefers_doctor_schedule() {
        let store = FakeStore::with_rows(vec![]);
        let schedule = Arc::new(FakeSchedule(Ok(json!({"appointments": []}))));
        let request = ListAppointments {
            doctor_id: Some("d-1".to_string()),
            ..Default::default()
        };

        let listed = service(store.clone(), schedule).list(&request).await.unwrap();

        assert_eq!(listed, json!({"appointments": []}));
        assert!(store.selects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_falls_back_to_records() {
        let store = FakeStore::with_rows(vec![json!({"id": "a-1"})]);
        let request = ListAppointments {
            doctor_id: Some("d-1".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 12, 18),
            ..Default::default()
        };

        let listed = service(store.clone(), unavailable_schedule())
            .list(&request)
            .await
            .unwrap();
        assert_eq!(listed, json!([{"id": "a-1"}]));

        let selects = store.selects.lock().unwrap();
        let query = &selects[0];
        assert_eq!(query.columns, "*, pacientes ( nome_completo ), medicos ( nome_completo )");
        assert_eq!(
            query.filters,
            vec![
                Filter::eq("medico_id", "d-1"),
                Filter::gte("data_hora", "2025-12-18T00:00:00Z"),
                Filter::lt("data_hora", "2025-12-19T00:00:00Z"),
            ]
        );
        let order = query.order.as_ref().unwrap();
        assert_eq!(order.column, "data_hora");
        assert!(!order.ascending);
    }

    #[tokio::test]
    async fn test_list_active_filter() {
        let store = FakeStore::with_rows(vec![]);
        let request = ListAppointments {
            patient_id: Some("p-1".to_string()),
            status_filter: Some(StatusFilter::Active),
            ..Default::default()
        };

        service(store.clone(), unavailable_schedule())
            .list(&request)
            .await
            .unwrap();

        let selects = store.selects.lock().unwrap();
        let query = &selects[0];
        assert_eq!(
            query.filters,
            vec![
                Filter::eq("paciente_id", "p-1"),
                Filter::neq("status", "cancelado"),
                Filter::gte("data_hora", "2025-12-01T15:00:00.000Z"),
            ]
        );
        assert!(query.order.as_ref().unwrap().ascending);
    }

    #[tokio::test]
    async fn test_list_store_failure() {
        let store = FakeStore::failing(UpstreamError::Transport("refused".to_string()));
        let err = service(store, unavailable_schedule())
            .list(&ListAppointments::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulingError::ListFailed(_)));
    }

    #[tokio::test]
    async fn test_cancel_with_reason() {
        let store = FakeStore::with_rows(vec![stored("agendado")]);
        let cancelled = service(store.clone(), unavailable_schedule())
            .cancel(&CancelAppointment {
                appointment_id: "a-1".to_string(),
                reason: Some("patient travelling".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(cancelled["status"], "cancelado");
        assert_eq!(cancelled["observacoes"], "Cancelled: patient travelling");

        let updates = store.updates.lock().unwrap();
        let (_, filters) = &updates[0];
        assert_eq!(filters[0].op, FilterOp::Eq);
        assert_eq!(filters[0].value, "a-1");
    }

    #[tokio::test]
    async fn test_cancel_missing_appointment() {
        let err = service(FakeStore::with_rows(vec![]), unavailable_schedule())
            .cancel(&CancelAppointment {
                appointment_id: "a-404".to_string(),
                reason: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulingError::AppointmentNotFound(id) if id == "a-404"));
    }

    fn update_request(start: Option<&str>, end: Option<&str>, notes: Option<&str>) -> UpdateAppointment {
        UpdateAppointment {
            appointment_id: "a-1".to_string(),
            start_time: start.map(|s| s.parse().unwrap()),
            end_time: end.map(|s| s.parse().unwrap()),
            notes: notes.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_update_blocked_when_cancelled() {
        let store = FakeStore::with_rows(vec![stored("cancelado")]);
        let err = service(store.clone(), unavailable_schedule())
            .update(&update_request(None, None, Some("late")))
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulingError::UpdateBlocked));
        assert!(err.to_string().contains("schedule_appointment"));
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_start_and_end() {
        let store = FakeStore::with_rows(vec![stored("agendado")]);
        let updated = service(store, unavailable_schedule())
            .update(&update_request(
                Some("2025-12-19T10:00:00Z"),
                Some("2025-12-19T10:45:00Z"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(updated["data_hora"], "2025-12-19T10:00:00Z");
        assert_eq!(updated["duracao_minutos"], 45);
    }

    #[tokio::test]
    async fn test_update_start_keeps_duration() {
        let store = FakeStore::with_rows(vec![stored("agendado")]);
        service(store.clone(), unavailable_schedule())
            .update(&update_request(Some("2025-12-19T10:00:00Z"), None, None))
            .await
            .unwrap();

        let updates = store.updates.lock().unwrap();
        let (patch, _) = &updates[0];
        assert!(patch.contains_key("data_hora"));
        assert!(!patch.contains_key("duracao_minutos"));
    }

    #[tokio::test]
    async fn test_update_end_uses_stored_start() {
        let store = FakeStore::with_rows(vec![stored("agendado")]);
        let updated = service(store, unavailable_schedule())
            .update(&update_request(None, Some("2025-12-18T13:30:00Z"), Some("moved")))
            .await
            .unwrap();

        assert_eq!(updated["duracao_minutos"], 90);
        assert_eq!(updated["observacoes"], "moved");
    }

    #[tokio::test]
    async fn test_update_rejects_end_before_start() {
        let store = FakeStore::with_rows(vec![stored("agendado")]);
        let err = service(store, unavailable_schedule())
            .update(&update_request(
                Some("2025-12-19T10:00:00Z"),
                Some("2025-12-19T09:00:00Z"),
                None,
            ))
            .await
            .unwrap_err();

        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_update_requires_changes() {
        let store = FakeStore::with_rows(vec![stored("agendado")]);
        let err = service(store.clone(), unavailable_schedule())
            .update(&update_request(None, None, Some("  ")))
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulingError::InvalidInput(_)));
        assert!(store.selects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_appointment() {
        let err = service(FakeStore::with_rows(vec![]), unavailable_schedule())
            .update(&update_request(None, None, Some("hello")))
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulingError::AppointmentNotFound(_)));
    }

    #[test]
    fn test_status_filter_deserialization() {
        let request: ListAppointments =
            serde_json::from_value(json!({"status_filter": "history", "date": "2025-12-18"})).unwrap();
        assert_eq!(request.status_filter, Some(StatusFilter::History));
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2025, 12, 18));
    }
}
