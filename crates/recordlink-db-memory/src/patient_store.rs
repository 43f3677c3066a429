use async_trait::async_trait;
use dashmap::DashMap;

use recordlink_core::{Document, MedicalEvent, Patient};
use recordlink_storage::{PatientStore, StorageError};

/// In-memory patient directory and event timeline.
///
/// Patients and medical events live in dashmap concurrent maps keyed by ID;
/// documents are embedded in their events. Seeding helpers make this the
/// fixture backend for directory tests.
#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    patients: DashMap<String, Patient>,
    events: DashMap<String, MedicalEvent>,
}

impl InMemoryPatientStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            patients: DashMap::new(),
            events: DashMap::new(),
        }
    }

    /// Adds or replaces a patient.
    pub fn add_patient(&self, patient: Patient) {
        self.patients.insert(patient.id.clone(), patient);
    }

    /// Adds or replaces a medical event (documents embedded).
    pub fn add_event(&self, event: MedicalEvent) {
        self.events.insert(event.id.clone(), event);
    }
}

#[async_trait]
impl PatientStore for InMemoryPatientStore {
    async fn get(&self, patient_id: &str) -> Result<Option<Patient>, StorageError> {
        Ok(self.patients.get(patient_id).map(|entry| entry.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Patient>, StorageError> {
        let mut patients: Vec<Patient> =
            self.patients.iter().map(|entry| entry.clone()).collect();
        patients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(patients)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Patient>, StorageError> {
        Ok(self
            .patients
            .iter()
            .filter(|entry| entry.phone == phone)
            .map(|entry| entry.clone())
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Patient>, StorageError> {
        Ok(self
            .patients
            .iter()
            .filter(|entry| entry.email == email)
            .map(|entry| entry.clone())
            .collect())
    }

    async fn search_name_or_id(&self, term: &str) -> Result<Vec<Patient>, StorageError> {
        let needle = term.to_lowercase();
        let mut matches: Vec<Patient> = self
            .patients
            .iter()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&needle)
                    || entry.id.to_lowercase().contains(&needle)
            })
            .map(|entry| entry.clone())
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches)
    }

    async fn events_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<MedicalEvent>, StorageError> {
        let mut events: Vec<MedicalEvent> = self
            .events
            .iter()
            .filter(|entry| entry.patient_id == patient_id)
            .map(|entry| entry.clone())
            .collect();
        // Newest first; events without an explicit date sort by creation time.
        events.sort_by_key(|e| std::cmp::Reverse(e.event_date.unwrap_or(e.created_at)));
        Ok(events)
    }

    async fn documents_for_event(&self, event_id: &str) -> Result<Vec<Document>, StorageError> {
        Ok(self
            .events
            .get(event_id)
            .map(|entry| entry.documents.clone())
            .unwrap_or_default())
    }
}
