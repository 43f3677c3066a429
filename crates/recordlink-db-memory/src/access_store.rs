use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use recordlink_core::{AccessRecord, now_utc};
use recordlink_storage::{AccessPatch, AccessRecordStore, StorageError, access_key};

/// Key into the access-record map.
pub(crate) type AccessKey = String; // Format: "provider_id/patient_id"

pub(crate) fn make_access_key(provider_id: &str, patient_id: &str) -> AccessKey {
    format!("{provider_id}/{patient_id}")
}

const ENTITY: &str = "access_record";

/// In-memory access-record store backed by a dashmap concurrent map.
///
/// Holds at most one record per (provider, patient) pair; the map key is the
/// formatted composite key. Updates are applied in place under the shard
/// lock, so the uniqueness invariant holds without extra coordination.
#[derive(Debug, Default)]
pub struct InMemoryAccessStore {
    records: DashMap<AccessKey, AccessRecord>,
}

impl InMemoryAccessStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl AccessRecordStore for InMemoryAccessStore {
    async fn find(
        &self,
        provider_id: &str,
        patient_id: &str,
    ) -> Result<Option<AccessRecord>, StorageError> {
        let key = make_access_key(provider_id, patient_id);
        Ok(self.records.get(&key).map(|entry| entry.clone()))
    }

    async fn insert(&self, record: AccessRecord) -> Result<AccessRecord, StorageError> {
        let key = make_access_key(&record.provider_id, &record.patient_id);
        match self.records.entry(key) {
            Entry::Occupied(_) => Err(StorageError::already_exists(
                ENTITY,
                access_key(&record.provider_id, &record.patient_id),
            )),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn update(
        &self,
        provider_id: &str,
        patient_id: &str,
        patch: AccessPatch,
    ) -> Result<AccessRecord, StorageError> {
        let key = make_access_key(provider_id, patient_id);
        match self.records.get_mut(&key) {
            Some(mut entry) => {
                entry.status = patch.status;
                entry.granted_at = patch.granted_at;
                entry.updated_at = now_utc();
                Ok(entry.clone())
            }
            None => Err(StorageError::not_found(
                ENTITY,
                access_key(provider_id, patient_id),
            )),
        }
    }

    async fn records_for_provider(
        &self,
        provider_id: &str,
    ) -> Result<Vec<AccessRecord>, StorageError> {
        let mut records: Vec<AccessRecord> = self
            .records
            .iter()
            .filter(|entry| entry.provider_id == provider_id)
            .map(|entry| entry.clone())
            .collect();
        records.sort_by(|a, b| a.patient_id.cmp(&b.patient_id));
        Ok(records)
    }
}
