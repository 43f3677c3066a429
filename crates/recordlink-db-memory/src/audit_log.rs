use async_trait::async_trait;
use tokio::sync::RwLock;

use recordlink_core::AuditEntry;
use recordlink_storage::{AuditSink, StorageError};

/// In-memory append-only audit log.
///
/// Entries are kept in arrival order behind a tokio `RwLock`; nothing ever
/// mutates or removes them.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every entry, oldest first. Test helper.
    pub async fn all(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }

    /// Number of entries recorded so far.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), StorageError> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn entries_for(
        &self,
        provider_id: &str,
        patient_id: &str,
    ) -> Result<Vec<AuditEntry>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.provider_id == provider_id && e.patient_id == patient_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordlink_core::{AccessAction, AuditOutcome};

    fn entry(provider_id: &str, patient_id: &str, action: AccessAction) -> AuditEntry {
        AuditEntry::new(provider_id, patient_id, action, AuditOutcome::Success, None)
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let log = InMemoryAuditLog::new();
        log.append(entry("prov-1", "pat-1", AccessAction::Request))
            .await
            .unwrap();
        log.append(entry("prov-1", "pat-1", AccessAction::Grant))
            .await
            .unwrap();

        let all = log.all().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].action, AccessAction::Request);
        assert_eq!(all[1].action, AccessAction::Grant);
    }

    #[tokio::test]
    async fn test_entries_for_filters_by_pair() {
        let log = InMemoryAuditLog::new();
        log.append(entry("prov-1", "pat-1", AccessAction::Request))
            .await
            .unwrap();
        log.append(entry("prov-2", "pat-1", AccessAction::Request))
            .await
            .unwrap();
        log.append(entry("prov-1", "pat-2", AccessAction::Request))
            .await
            .unwrap();

        let matched = log.entries_for("prov-1", "pat-1").await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].provider_id, "prov-1");
        assert_eq!(matched[0].patient_id, "pat-1");
        assert_eq!(log.len().await, 3);
    }
}
