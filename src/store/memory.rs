//! In-memory record store for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{unix_now, update_fields, RecordStore, RecordUpdate, StoreError};

/// Stored write-back, with the fields as they would land in a document.
#[derive(Debug, Clone)]
pub struct StoredUpdate {
    pub update: RecordUpdate,
    pub fields: serde_json::Map<String, serde_json::Value>,
    /// How many writes this record has received.
    pub write_count: u32,
}

/// A `RecordStore` keeping documents in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<String, StoredUpdate>>,
    fail_writes: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent writes fail, to exercise write-back error paths.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The last update written for a record, if any.
    pub fn record(&self, record_id: &str) -> Option<StoredUpdate> {
        self.records
            .lock()
            .expect("record store lock poisoned")
            .get(record_id)
            .cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn update_record(
        &self,
        record_id: &str,
        update: &RecordUpdate,
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Request("simulated store outage".to_string()));
        }

        let fields = update_fields(update, unix_now())?;
        let mut records = self.records.lock().expect("record store lock poisoned");
        let write_count = records
            .get(record_id)
            .map(|existing| existing.write_count + 1)
            .unwrap_or(1);
        records.insert(
            record_id.to_string(),
            StoredUpdate {
                update: update.clone(),
                fields,
                write_count,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_updates() {
        let store = MemoryRecordStore::new();
        let update = RecordUpdate::Error {
            error_message: "boom".to_string(),
        };
        store.update_record("cyl-1", &update).await.unwrap();

        let stored = store.record("cyl-1").unwrap();
        assert_eq!(stored.update, update);
        assert_eq!(stored.write_count, 1);
        assert!(stored.fields.contains_key("errorTimestamp"));
        assert!(store.record("cyl-2").is_none());
    }

    #[tokio::test]
    async fn simulated_outage_fails_writes() {
        let store = MemoryRecordStore::new();
        store.fail_writes(true);
        let result = store
            .update_record(
                "cyl-1",
                &RecordUpdate::Error {
                    error_message: "boom".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::Request(_))));
        assert!(store.record("cyl-1").is_none());
    }
}
