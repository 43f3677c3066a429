//! # recordlink-directory
//!
//! Patient directory and medical-event timeline for the RecordLink
//! patient-records subsystem.
//!
//! This crate is the read side of the application: providers find patients
//! (exact phone/email search or name/ID substring search), view a patient's
//! profile with computed display fields, and browse the medical-event
//! timeline with its attached documents. Document file paths resolve to
//! public storage URLs.
//!
//! Write-side access control lives in `recordlink-access`; whether a
//! provider may see the data served here is that crate's concern.

mod error;
mod service;
mod urls;

pub use error::{DirectoryError, DirectoryResult};
pub use service::PatientDirectory;
pub use urls::{BUCKET, resolve_storage_url};
