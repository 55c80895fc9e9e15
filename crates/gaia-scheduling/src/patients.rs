//! Find-or-create for patients.
//!
//! One search is issued with the strongest key the caller provided
//! (phone, then CPF, then name). A failed or empty search counts as a miss,
//! and a miss registers the patient.

use crate::adapter::PatientDirectory;
use crate::error::SchedulingError;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Arguments of `get_or_create_patient`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GetOrCreatePatient {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub organization_id: String,
}

/// Key used for a single patient search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientLookup {
    Phone(String),
    Cpf(String),
    Name(String),
}

impl PatientLookup {
    /// Strongest available key: phone, then CPF, then name.
    pub fn for_request(request: &GetOrCreatePatient) -> Self {
        let present = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };

        if let Some(phone) = present(&request.phone) {
            PatientLookup::Phone(phone)
        } else if let Some(cpf) = present(&request.cpf) {
            PatientLookup::Cpf(cpf)
        } else {
            PatientLookup::Name(request.name.clone())
        }
    }

    /// Key name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            PatientLookup::Phone(_) => "phone",
            PatientLookup::Cpf(_) => "cpf",
            PatientLookup::Name(_) => "name",
        }
    }
}

/// Registration payload for a new patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub organization_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
}

impl From<&GetOrCreatePatient> for NewPatient {
    fn from(request: &GetOrCreatePatient) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            name: request.name.clone(),
            phone: request.phone.clone(),
            cpf: request.cpf.clone(),
            email: request.email.clone(),
        }
    }
}

/// Resolves a patient record, creating it on a miss.
pub struct PatientResolver {
    directory: Arc<dyn PatientDirectory>,
}

impl PatientResolver {
    pub fn new(directory: Arc<dyn PatientDirectory>) -> Self {
        Self { directory }
    }

    /// Return the existing patient or the newly created one.
    pub async fn get_or_create(
        &self,
        request: &GetOrCreatePatient,
    ) -> Result<Value, SchedulingError> {
        let lookup = PatientLookup::for_request(request);
        tracing::info!(lookup = lookup.kind(), "Resolving patient");

        match self
            .directory
            .search_patient(&request.organization_id, &lookup)
            .await
        {
            Ok(body) => {
                if let Some(patient) = first_match(body) {
                    let patient_id = patient.get("id").cloned().unwrap_or_default();
                    tracing::info!(%patient_id, "Patient found");
                    return Ok(patient);
                }
            }
            Err(e) => {
                tracing::warn!(
                    not_found = e.is_not_found(),
                    error = %e,
                    "Patient search failed, proceeding to creation"
                );
            }
        }

        tracing::info!("Patient not found, creating");
        let created = self
            .directory
            .create_patient(&NewPatient::from(request))
            .await
            .map_err(|e| SchedulingError::PatientCreateFailed(e.to_string()))?;

        let patient_id = created.get("id").cloned().unwrap_or_default();
        tracing::info!(%patient_id, "Patient created");
        Ok(created)
    }
}

/// A list yields its first element; an object with an `id` yields itself.
fn first_match(body: Value) -> Option<Value> {
    match body {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(map) if map.get("id").is_some_and(|id| !id.is_null()) => {
            Some(Value::Object(map))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::UpstreamError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeDirectory {
        search_result: Result<Value, UpstreamError>,
        create_result: Result<Value, UpstreamError>,
        searches: Mutex<Vec<PatientLookup>>,
        created: Mutex<Vec<NewPatient>>,
    }

    impl FakeDirectory {
        fn new(
            search_result: Result<Value, UpstreamError>,
            create_result: Result<Value, UpstreamError>,
        ) -> Arc<Self> {
            Arc::new(Self {
                search_result,
                create_result,
                searches: Mutex::new(Vec::new()),
                created: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PatientDirectory for FakeDirectory {
        async fn search_patient(
            &self,
            _organization_id: &str,
            lookup: &PatientLookup,
        ) -> Result<Value, UpstreamError> {
            self.searches.lock().unwrap().push(lookup.clone());
            self.search_result.clone()
        }

        async fn create_patient(&self, patient: &NewPatient) -> Result<Value, UpstreamError> {
            self.created.lock().unwrap().push(patient.clone());
            self.create_result.clone()
        }
    }

    fn request(phone: Option<&str>, cpf: Option<&str>) -> GetOrCreatePatient {
        GetOrCreatePatient {
            phone: phone.map(String::from),
            cpf: cpf.map(String::from),
            name: "Maria Silva".to_string(),
            email: None,
            organization_id: "org-1".to_string(),
        }
    }

    #[test]
    fn test_lookup_priority() {
        assert_eq!(
            PatientLookup::for_request(&request(Some("5511999"), Some("123"))),
            PatientLookup::Phone("5511999".to_string())
        );
        assert_eq!(
            PatientLookup::for_request(&request(Some(""), Some("123"))),
            PatientLookup::Cpf("123".to_string())
        );
        assert_eq!(
            PatientLookup::for_request(&request(None, None)),
            PatientLookup::Name("Maria Silva".to_string())
        );
    }

    #[tokio::test]
    async fn test_existing_patient_from_list() {
        let directory = FakeDirectory::new(
            Ok(json!([{"id": "p-1"}, {"id": "p-2"}])),
            Ok(json!({"id": "new"})),
        );
        let resolver = PatientResolver::new(directory.clone());

        let patient = resolver
            .get_or_create(&request(Some("5511999"), None))
            .await
            .unwrap();

        assert_eq!(patient["id"], "p-1");
        assert!(directory.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_existing_patient_from_object() {
        let directory = FakeDirectory::new(Ok(json!({"id": "p-9"})), Ok(json!({"id": "new"})));
        let patient = PatientResolver::new(directory)
            .get_or_create(&request(None, Some("123")))
            .await
            .unwrap();

        assert_eq!(patient["id"], "p-9");
    }

    #[tokio::test]
    async fn test_empty_search_creates() {
        let directory = FakeDirectory::new(Ok(json!([])), Ok(json!({"id": "new"})));
        let patient = PatientResolver::new(directory.clone())
            .get_or_create(&request(Some("5511999"), None))
            .await
            .unwrap();

        assert_eq!(patient["id"], "new");
        let created = directory.created.lock().unwrap();
        assert_eq!(created[0].name, "Maria Silva");
        assert_eq!(created[0].phone.as_deref(), Some("5511999"));
    }

    #[tokio::test]
    async fn test_search_failure_creates() {
        let directory = FakeDirectory::new(
            Err(UpstreamError::Transport("connection reset".to_string())),
            Ok(json!({"id": "new"})),
        );
        let patient = PatientResolver::new(directory.clone())
            .get_or_create(&request(None, None))
            .await
            .unwrap();

        assert_eq!(patient["id"], "new");
        assert_eq!(directory.searches.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_is_reported() {
        let directory = FakeDirectory::new(
            Err(UpstreamError::Status {
                status: 404,
                body: "not found".to_string(),
            }),
            Err(UpstreamError::Status {
                status: 400,
                body: "nome_completo is required".to_string(),
            }),
        );
        let err = PatientResolver::new(directory)
            .get_or_create(&request(None, None))
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulingError::PatientCreateFailed(_)));
        assert!(err.to_string().contains("nome_completo is required"));
    }
}
