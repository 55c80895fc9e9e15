//! Tool execution.
//!
//! A call goes through four steps:
//!
//! 1. look the tool up in the registry (`ToolNotFound` otherwise)
//! 2. validate the arguments against its input schema
//! 3. decode them into a [`ToolRequest`]
//! 4. dispatch to the scheduling operation and serialise its result
//!
//! Each call runs inside a `tool_call` span carrying a fresh request id.

use crate::definitions::builtin_registry;
use crate::error::ToolError;
use crate::request::ToolRequest;
use crate::tools::ToolRegistry;
use crate::validator::ArgumentValidator;
use gaia_core::GaiaConfig;
use gaia_scheduling::{
    AppointmentService, AvailabilityResolver, AvailabilityService, Clock, DoctorSchedule,
    PatientDirectory, PatientResolver, RecordStore,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Runs tool calls against the scheduling operations.
pub struct ToolExecutor {
    registry: ToolRegistry,
    validator: ArgumentValidator,
    availability: AvailabilityResolver,
    appointments: AppointmentService,
    patients: PatientResolver,
}

impl ToolExecutor {
    /// Create an executor serving the built-in tools.
    pub fn new(
        availability: AvailabilityResolver,
        appointments: AppointmentService,
        patients: PatientResolver,
    ) -> Result<Self, ToolError> {
        let registry = builtin_registry();
        let validator = ArgumentValidator::compile(&registry)?;
        Ok(Self {
            registry,
            validator,
            availability,
            appointments,
            patients,
        })
    }

    /// Wire every operation to a single backend implementing all collaborators.
    pub fn from_backend<B>(backend: Arc<B>, config: &GaiaConfig) -> Result<Self, ToolError>
    where
        B: AvailabilityService + RecordStore + DoctorSchedule + PatientDirectory + 'static,
    {
        let availability = AvailabilityResolver::new(backend.clone(), &config.availability);
        let appointments =
            AppointmentService::new(backend.clone(), backend.clone(), config.store.clone());
        let patients = PatientResolver::new(backend);
        Self::new(availability, appointments, patients)
    }

    /// Replace the clock of every time-dependent operation.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self {
            availability: self.availability.with_clock(clock.clone()),
            appointments: self.appointments.with_clock(clock),
            ..self
        }
    }

    /// The published tools.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute the named tool with raw JSON arguments.
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("tool_call", tool = %name, %request_id);

        async move {
            let started = Instant::now();
            tracing::info!("Executing tool");

            let result = self.run(name, arguments).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(_) => tracing::info!(elapsed_ms, "Tool call succeeded"),
                Err(e) if e.status_code().is_client_error() => {
                    tracing::warn!(elapsed_ms, error = %e, "Tool call rejected")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "Tool call failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        if !self.registry.contains(name) {
            return Err(ToolError::ToolNotFound {
                name: name.to_string(),
            });
        }
        self.validator.validate(name, &arguments)?;
        let request = ToolRequest::parse(name, arguments)?;
        self.dispatch(request).await
    }

    /// Run an already decoded request.
    pub async fn dispatch(&self, request: ToolRequest) -> Result<Value, ToolError> {
        tracing::debug!(tool = request.tool_name(), "Dispatching tool request");
        let result = match request {
            ToolRequest::ScheduleAppointment(req) => self.appointments.schedule(&req).await?,
            ToolRequest::ListAppointments(req) => self.appointments.list(&req).await?,
            ToolRequest::CheckAvailability(query) => {
                serde_json::to_value(self.availability.check(&query).await?)?
            }
            ToolRequest::CancelAppointment(req) => self.appointments.cancel(&req).await?,
            ToolRequest::UpdateAppointment(req) => self.appointments.update(&req).await?,
            ToolRequest::GetOrCreatePatient(req) => self.patients.get_or_create(&req).await?,
        };
        Ok(result)
    }
}
