//! The patient directory service.
//!
//! Read-side companion to the access-control subsystem: patient search, the
//! medical-event timeline, and document URL resolution. All state lives in
//! the injected [`PatientStore`].

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use recordlink_core::{AccessStatus, Document, MedicalEventView, Patient, PatientProfile, now_utc};
use recordlink_storage::{AccessRecordStore, PatientStore};

use crate::error::{DirectoryError, DirectoryResult};
use crate::urls::resolve_storage_url;

// Term-shape routing for the public search box: exactly ten digits is a
// phone number, anything with a local part, an @ and a dotted domain is an
// email. Everything else never reaches the backend.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("phone pattern is valid"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Serves patient lookups and timelines for presentation surfaces.
#[derive(Clone)]
pub struct PatientDirectory {
    store: Arc<dyn PatientStore>,
    access_records: Option<Arc<dyn AccessRecordStore>>,
    storage_base: Option<Url>,
}

impl PatientDirectory {
    /// Creates a directory over the given store, without document URL
    /// resolution or provider-scoped listings.
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self {
            store,
            access_records: None,
            storage_base: None,
        }
    }

    /// Attaches the access-record store that backs
    /// [`patients_for_provider`].
    ///
    /// [`patients_for_provider`]: PatientDirectory::patients_for_provider
    #[must_use]
    pub fn with_access_records(mut self, access: Arc<dyn AccessRecordStore>) -> Self {
        self.access_records = Some(access);
        self
    }

    /// Sets the storage base URL used by [`document_url`].
    ///
    /// [`document_url`]: PatientDirectory::document_url
    #[must_use]
    pub fn with_storage_base(mut self, base: Url) -> Self {
        self.storage_base = Some(base);
        self
    }

    /// Exact-match patient search routed by term shape: a 10-digit term
    /// searches by phone, an email-shaped term by email. Any other term
    /// returns an empty result without touching the backend.
    pub async fn search(&self, term: &str) -> DirectoryResult<Vec<Patient>> {
        if PHONE_RE.is_match(term) {
            return Ok(self.store.find_by_phone(term).await?);
        }
        if EMAIL_RE.is_match(term) {
            return Ok(self.store.find_by_email(term).await?);
        }
        tracing::debug!(term, "search term is neither phone nor email; skipping backend");
        Ok(vec![])
    }

    /// Case-insensitive substring search over patient name and ID, ordered
    /// by name. An empty term returns an empty result.
    pub async fn search_by_name_or_id(&self, term: &str) -> DirectoryResult<Vec<Patient>> {
        if term.is_empty() {
            return Ok(vec![]);
        }
        Ok(self.store.search_name_or_id(term).await?)
    }

    /// Every patient in the directory, ordered by name.
    pub async fn list_patients(&self) -> DirectoryResult<Vec<Patient>> {
        Ok(self.store.list_all().await?)
    }

    /// The patients a provider currently holds granted access to, ordered by
    /// name. Pending, denied, and revoked records confer no visibility.
    ///
    /// # Errors
    ///
    /// Fails with `NotConfigured` if no access-record store was attached.
    pub async fn patients_for_provider(
        &self,
        provider_id: &str,
    ) -> DirectoryResult<Vec<Patient>> {
        let access = self
            .access_records
            .as_ref()
            .ok_or_else(|| DirectoryError::not_configured("no access-record store attached"))?;

        let mut patients = Vec::new();
        for record in access.records_for_provider(provider_id).await? {
            if record.status != AccessStatus::Allowed {
                continue;
            }
            if let Some(patient) = self.store.get(&record.patient_id).await? {
                patients.push(patient);
            }
        }
        patients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(patients)
    }

    /// Fetches a patient and derives the display profile (computed age,
    /// defaulted clinical lists). Returns `None` for an unknown ID.
    pub async fn patient_profile(
        &self,
        patient_id: &str,
    ) -> DirectoryResult<Option<PatientProfile>> {
        let today = now_utc().date();
        Ok(self
            .store
            .get(patient_id)
            .await?
            .map(|patient| PatientProfile::derive(patient, today)))
    }

    /// The patient's medical events, newest first, shaped for the timeline
    /// UI.
    pub async fn timeline(&self, patient_id: &str) -> DirectoryResult<Vec<MedicalEventView>> {
        let events = self.store.events_for_patient(patient_id).await?;
        Ok(events.into_iter().map(MedicalEventView::from).collect())
    }

    /// The documents attached to one medical event.
    pub async fn event_documents(&self, event_id: &str) -> DirectoryResult<Vec<Document>> {
        Ok(self.store.documents_for_event(event_id).await?)
    }

    /// Resolves a document file path to its public URL.
    ///
    /// # Errors
    ///
    /// Fails with `NotConfigured` if no storage base was set, or with
    /// `InvalidUrl` if the path cannot form a valid URL.
    pub fn document_url(&self, file_path: &str) -> DirectoryResult<Url> {
        let base = self
            .storage_base
            .as_ref()
            .ok_or_else(|| DirectoryError::not_configured("no storage base set"))?;
        resolve_storage_url(base, file_path)
    }
}
