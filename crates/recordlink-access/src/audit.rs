//! Best-effort audit logging for access-control actions.
//!
//! The logger wraps an [`AuditSink`] and guarantees non-propagation: a sink
//! failure is reported through a tracing diagnostic and swallowed, never
//! surfaced to the mutation path. There is no transactional coupling between
//! the primary store write and the audit write; an entry can be lost if the
//! process dies between the two.

use std::sync::Arc;

use recordlink_core::{AccessAction, AuditEntry, AuditOutcome};
use recordlink_storage::AuditSink;

/// Records every access-control action attempt against an audit sink.
#[derive(Clone)]
pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    /// Creates a logger over the given sink.
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Appends one entry. Never returns an error; sink failures are logged
    /// locally and dropped.
    pub async fn log(
        &self,
        provider_id: &str,
        patient_id: &str,
        action: AccessAction,
        outcome: AuditOutcome,
        note: Option<String>,
    ) {
        let entry = AuditEntry::new(provider_id, patient_id, action, outcome, note);
        if let Err(err) = self.sink.append(entry).await {
            tracing::warn!(
                provider_id,
                patient_id,
                action = %action,
                outcome = %outcome,
                error = %err,
                "audit write failed; primary operation result is unaffected"
            );
        }
    }

    /// Records a successful action.
    pub async fn success(&self, provider_id: &str, patient_id: &str, action: AccessAction) {
        self.log(provider_id, patient_id, action, AuditOutcome::Success, None)
            .await;
    }

    /// Records a failed action with the error display as the note.
    pub async fn failure(
        &self,
        provider_id: &str,
        patient_id: &str,
        action: AccessAction,
        note: String,
    ) {
        self.log(
            provider_id,
            patient_id,
            action,
            AuditOutcome::Failed,
            Some(note),
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use recordlink_storage::StorageError;

    /// Sink that always fails; the logger must shrug it off.
    struct BrokenSink;

    #[async_trait]
    impl AuditSink for BrokenSink {
        async fn append(&self, _entry: AuditEntry) -> Result<(), StorageError> {
            Err(StorageError::connection("sink offline"))
        }

        async fn entries_for(
            &self,
            _provider_id: &str,
            _patient_id: &str,
        ) -> Result<Vec<AuditEntry>, StorageError> {
            Err(StorageError::connection("sink offline"))
        }
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_panic_or_propagate() {
        let logger = AuditLogger::new(Arc::new(BrokenSink));
        logger
            .log(
                "prov-1",
                "pat-1",
                AccessAction::Grant,
                AuditOutcome::Success,
                None,
            )
            .await;
        logger
            .failure(
                "prov-1",
                "pat-1",
                AccessAction::Deny,
                "boom".to_string(),
            )
            .await;
    }
}
