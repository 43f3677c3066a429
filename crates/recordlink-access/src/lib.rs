//! # recordlink-access
//!
//! Provider-patient access control for the RecordLink patient-records
//! subsystem.
//!
//! This crate provides:
//! - The access-control state machine (request, request-again, grant, deny,
//!   revoke) over a pluggable record store
//! - Best-effort audit logging of every action attempt
//! - The status-to-prompt mapping consumed by presentation surfaces
//!
//! ## Overview
//!
//! One [`AccessRecord`] exists per (provider, patient) pair; its status moves
//! through `pending`, `allowed`, `denied` and `revoked`, with "no record" as
//! the implicit initial state. The [`AccessControlService`] validates each
//! transition against an explicit table, performs a single store mutation,
//! and appends one [`AuditEntry`] per attempt regardless of outcome.
//!
//! ## Modules
//!
//! - [`service`] - the access-control service and its outcome type
//! - [`transition`] - the state-machine transition table
//! - [`view`] - status-derived presentation mapping
//! - [`audit`] - best-effort audit logger
//! - [`config`] - service configuration
//! - [`error`] - access-control error taxonomy
//!
//! [`AccessRecord`]: recordlink_core::AccessRecord
//! [`AuditEntry`]: recordlink_core::AuditEntry

pub mod audit;
pub mod config;
pub mod error;
pub mod service;
pub mod transition;
pub mod view;

pub use audit::AuditLogger;
pub use config::{AccessConfig, DuplicateRequestPolicy};
pub use error::{AccessError, AccessResult, ErrorCategory};
pub use service::{AccessControlService, AccessOutcome};
pub use view::StatusView;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use recordlink_access::prelude::*;
/// ```
pub mod prelude {
    pub use crate::audit::AuditLogger;
    pub use crate::config::{AccessConfig, DuplicateRequestPolicy};
    pub use crate::error::{AccessError, AccessResult, ErrorCategory};
    pub use crate::service::{AccessControlService, AccessOutcome};
    pub use crate::view::StatusView;
    pub use recordlink_core::{AccessAction, AccessRecord, AccessStatus, AuditEntry, AuditOutcome};
}
