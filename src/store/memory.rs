use std::sync::Mutex;

use axum::async_trait;
use uuid::Uuid;

use crate::records::model::{CredentialRecord, RecordFields};
use crate::store::RecordStore;

/// In-memory record store. Backs tests and fixture state; the contract is
/// identical to the Postgres store, including id assignment.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<CredentialRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CredentialRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self) -> anyhow::Result<Vec<CredentialRecord>> {
        Ok(self.records.lock().expect("records lock poisoned").clone())
    }

    async fn create(&self, fields: RecordFields) -> anyhow::Result<CredentialRecord> {
        let record = CredentialRecord::from_fields(Uuid::new_v4(), fields);
        self.records
            .lock()
            .expect("records lock poisoned")
            .push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, fields: RecordFields) -> anyhow::Result<bool> {
        let mut records = self.records.lock().expect("records lock poisoned");
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.site = fields.site;
                record.username = fields.username;
                record.password = fields.password;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        let mut records = self.records.lock().expect("records lock poisoned");
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok((before - records.len()) as u64)
    }
}
