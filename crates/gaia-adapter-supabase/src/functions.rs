//! Edge-function backed collaborators.

use crate::client::{SupabaseClient, read_json, transport};
use async_trait::async_trait;
use gaia_core::AvailabilityQuery;
use gaia_scheduling::{
    AvailabilityService, DoctorSchedule, NewPatient, PatientDirectory, PatientLookup,
    UpstreamError,
};
use reqwest::Method;
use serde_json::{Map, Value, json};

#[async_trait]
impl AvailabilityService for SupabaseClient {
    async fn fetch_availability(&self, query: &AvailabilityQuery) -> Result<Value, UpstreamError> {
        self.invoke_function(&self.availability_function, &query.query_pairs())
            .await
    }
}

#[async_trait]
impl DoctorSchedule for SupabaseClient {
    async fn doctor_schedule(
        &self,
        doctor_id: &str,
        date: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        let path = self
            .doctor_schedule_function
            .replace("{doctor_id}", doctor_id);
        let query: Vec<(&str, String)> = date
            .map(|d| vec![("date", d.to_string())])
            .unwrap_or_default();
        self.invoke_function(&path, &query).await
    }
}

#[async_trait]
impl PatientDirectory for SupabaseClient {
    async fn search_patient(
        &self,
        organization_id: &str,
        lookup: &PatientLookup,
    ) -> Result<Value, UpstreamError> {
        let fields = &self.patients.fields;
        let mut query = vec![(fields.organization_id.as_str(), organization_id.to_string())];

        let function = match lookup {
            PatientLookup::Phone(phone) => {
                query.push((fields.phone.as_str(), phone.clone()));
                &self.patients.search_by_phone_function
            }
            PatientLookup::Cpf(cpf) => {
                query.push((fields.query.as_str(), cpf.clone()));
                query.push((fields.search_type.as_str(), "cpf".to_string()));
                &self.patients.search_function
            }
            PatientLookup::Name(name) => {
                query.push((fields.query.as_str(), name.clone()));
                query.push((fields.search_type.as_str(), "name".to_string()));
                &self.patients.search_function
            }
        };

        self.invoke_function(function, &query).await
    }

    async fn create_patient(&self, patient: &NewPatient) -> Result<Value, UpstreamError> {
        let fields = &self.patients.fields;
        let mut body = Map::new();
        body.insert(fields.organization_id.clone(), json!(patient.organization_id));
        body.insert(fields.full_name.clone(), json!(patient.name));
        for (field, value) in [
            (&fields.phone, &patient.phone),
            (&fields.cpf, &patient.cpf),
            (&fields.email, &patient.email),
        ] {
            if let Some(value) = value {
                body.insert(field.clone(), json!(value));
            }
        }

        let url = self.function_url(&self.patients.create_function);
        tracing::debug!(function = %self.patients.create_function, "Creating patient");

        let response = self
            .request(Method::POST, &url)
            .json(&Value::Object(body))
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }
}
