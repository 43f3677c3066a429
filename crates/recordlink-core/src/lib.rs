//! # recordlink-core
//!
//! Core domain types for the RecordLink patient-records subsystem.
//!
//! This crate defines the types shared by every other RecordLink crate:
//!
//! - [`AccessRecord`] and [`AccessStatus`] - the per-(provider, patient)
//!   permission state
//! - [`AuditEntry`], [`AccessAction`] and [`AuditOutcome`] - the append-only
//!   audit trail of access-control actions
//! - [`Patient`], [`MedicalEvent`] and [`Document`] - directory and timeline
//!   records, with their derived display forms
//! - timestamp and ID helpers
//!
//! It contains no I/O and no storage; those live in `recordlink-storage` and
//! its backend crates.

pub mod access;
pub mod audit;
pub mod error;
pub mod id;
pub mod patient;
pub mod time;

pub use access::{AccessRecord, AccessStatus};
pub use audit::{AccessAction, AuditEntry, AuditOutcome};
pub use error::{CoreError, ErrorCategory, Result};
pub use id::generate_id;
pub use patient::{Document, MedicalEvent, MedicalEventView, Patient, PatientProfile};
pub use time::{format_display_date, now_utc};
