//! Directory error types.

use recordlink_storage::StorageError;

/// Errors that can occur during directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// A wrapped failure from the persistence layer.
    #[error("Backend error: {0}")]
    Backend(#[from] StorageError),

    /// A document path could not be resolved to a valid URL.
    #[error("Invalid storage URL: {message}")]
    InvalidUrl {
        /// Description of the URL problem.
        message: String,
    },

    /// A required collaborator was not configured on the service.
    #[error("Directory not configured: {message}")]
    NotConfigured {
        /// What is missing.
        message: String,
    },
}

impl DirectoryError {
    /// Creates a new `InvalidUrl` error.
    #[must_use]
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    /// Creates a new `NotConfigured` error.
    #[must_use]
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured {
            message: message.into(),
        }
    }
}

/// Type alias for directory results.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
