//! Access-control service configuration.

use serde::{Deserialize, Serialize};

/// Behavior of `request_access` when a record already exists for the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateRequestPolicy {
    /// Fail with a duplicate-request error; the caller should use
    /// request_again. Default.
    #[default]
    Reject,
    /// Idempotent success: return the existing record without mutating it.
    ReturnExisting,
}

/// Configuration for the access-control service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Enforce the state-machine source sets for grant/deny/revoke.
    /// Default: true. Turning this off restores the historical lenient
    /// behavior where any existing record can be flipped by those actions.
    pub strict_transitions: bool,

    /// How `request_access` treats an existing record.
    /// Default: [`DuplicateRequestPolicy::Reject`].
    pub duplicate_request: DuplicateRequestPolicy,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            strict_transitions: true,
            duplicate_request: DuplicateRequestPolicy::default(),
        }
    }
}

impl AccessConfig {
    /// Creates a configuration with lenient grant/deny/revoke transitions.
    #[must_use]
    pub fn with_lenient_transitions(mut self) -> Self {
        self.strict_transitions = false;
        self
    }

    /// Creates a configuration with the given duplicate-request policy.
    #[must_use]
    pub fn with_duplicate_request(mut self, policy: DuplicateRequestPolicy) -> Self {
        self.duplicate_request = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict_and_rejecting() {
        let config = AccessConfig::default();
        assert!(config.strict_transitions);
        assert_eq!(config.duplicate_request, DuplicateRequestPolicy::Reject);
    }

    #[test]
    fn test_builders() {
        let config = AccessConfig::default()
            .with_lenient_transitions()
            .with_duplicate_request(DuplicateRequestPolicy::ReturnExisting);
        assert!(!config.strict_transitions);
        assert_eq!(
            config.duplicate_request,
            DuplicateRequestPolicy::ReturnExisting
        );
    }
}
