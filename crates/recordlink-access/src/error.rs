//! Access-control error types.
//!
//! Every failure of an access-control operation is reported through
//! [`AccessError`]; nothing on the operation path panics or propagates a raw
//! storage error to the presentation layer.

use std::fmt;

use recordlink_core::{AccessAction, AccessStatus};

/// Errors that can occur during access-control operations.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The backend was unreachable or returned a malformed response during a
    /// read.
    #[error("Lookup failed: {message}")]
    Lookup {
        /// Description of the lookup failure.
        message: String,
    },

    /// A mutation targeted a (provider, patient) pair with no existing
    /// record.
    #[error("No access record for provider {provider_id} and patient {patient_id}")]
    NotFound {
        /// The provider side of the missing pair.
        provider_id: String,
        /// The patient side of the missing pair.
        patient_id: String,
    },

    /// An access request was issued while a record already exists; the caller
    /// should use request_again instead.
    #[error("Access already requested for provider {provider_id} and patient {patient_id}")]
    DuplicateRequest {
        /// The provider side of the existing pair.
        provider_id: String,
        /// The patient side of the existing pair.
        patient_id: String,
    },

    /// The current status is not a valid source state for the attempted
    /// action (strict mode only).
    #[error("Cannot {action} from status {from}")]
    InvalidTransition {
        /// The attempted action.
        action: AccessAction,
        /// The current status the action was attempted from.
        from: AccessStatus,
    },

    /// A wrapped failure from the persistence layer.
    #[error("Backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

impl AccessError {
    /// Creates a new `Lookup` error.
    #[must_use]
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(provider_id: impl Into<String>, patient_id: impl Into<String>) -> Self {
        Self::NotFound {
            provider_id: provider_id.into(),
            patient_id: patient_id.into(),
        }
    }

    /// Creates a new `DuplicateRequest` error.
    #[must_use]
    pub fn duplicate_request(
        provider_id: impl Into<String>,
        patient_id: impl Into<String>,
    ) -> Self {
        Self::DuplicateRequest {
            provider_id: provider_id.into(),
            patient_id: patient_id.into(),
        }
    }

    /// Creates a new `InvalidTransition` error.
    #[must_use]
    pub fn invalid_transition(action: AccessAction, from: AccessStatus) -> Self {
        Self::InvalidTransition { action, from }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a duplicate request error.
    #[must_use]
    pub fn is_duplicate_request(&self) -> bool {
        matches!(self, Self::DuplicateRequest { .. })
    }

    /// Returns `true` if this is an invalid transition error.
    #[must_use]
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Lookup { .. } => ErrorCategory::Infrastructure,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicateRequest { .. } => ErrorCategory::Conflict,
            Self::InvalidTransition { .. } => ErrorCategory::Precondition,
            Self::Backend { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of access-control errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Record not found.
    NotFound,
    /// Conflict with an existing record.
    Conflict,
    /// State-machine precondition failure.
    Precondition,
    /// Infrastructure/connection error.
    Infrastructure,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Precondition => write!(f, "precondition"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Type alias for access-control results.
pub type AccessResult<T> = Result<T, AccessError>;
