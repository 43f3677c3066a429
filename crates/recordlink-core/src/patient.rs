//! Patient directory and timeline record types.
//!
//! These are the raw shapes held by a patient store backend plus the derived
//! display forms consumed by presentation surfaces. The derived forms fill
//! display defaults for missing fields so the UI never has to.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A patient as held in the directory backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: Option<Date>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

/// A patient enriched with computed display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientProfile {
    #[serde(flatten)]
    pub patient: Patient,
    /// Whole years since date_of_birth, or `None` when the birth date is
    /// unknown.
    pub age: Option<i32>,
}

impl PatientProfile {
    /// Derives a profile from a raw patient record, computing the age against
    /// the given reference date.
    pub fn derive(patient: Patient, today: Date) -> Self {
        let age = patient.date_of_birth.map(|dob| age_on(dob, today));
        Self { patient, age }
    }
}

/// Computes a whole-year age, accounting for whether the birthday has passed
/// in the reference year.
pub fn age_on(date_of_birth: Date, today: Date) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    let birthday_passed = (u8::from(today.month()), today.day())
        >= (u8::from(date_of_birth.month()), date_of_birth.day());
    if !birthday_passed {
        age -= 1;
    }
    age
}

/// A medical event as held in the backend, with its attached documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalEvent {
    pub id: String,
    pub patient_id: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub event_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// A document attached to a medical event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub medical_event_id: String,
    pub file_path: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub is_processed: bool,
}

/// A medical event shaped for the timeline UI, with display defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalEventView {
    pub id: String,
    pub patient_id: String,
    pub kind: String,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub provider: String,
    /// Preview image: the first attached document's file path, if any.
    pub image: Option<String>,
}

impl From<MedicalEvent> for MedicalEventView {
    fn from(event: MedicalEvent) -> Self {
        let image = event.documents.first().map(|doc| doc.file_path.clone());
        Self {
            id: event.id,
            patient_id: event.patient_id,
            kind: event.kind.unwrap_or_else(|| "document".to_string()),
            title: event.title.unwrap_or_else(|| "Medical Document".to_string()),
            description: event
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            date: event.event_date.unwrap_or(event.created_at),
            provider: event
                .provider_name
                .unwrap_or_else(|| "Unknown Provider".to_string()),
            image,
        }
    }
}
