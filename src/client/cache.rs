use uuid::Uuid;

use crate::records::model::{CredentialRecord, RecordFields};

/// In-memory ordered mirror of the backend's records, loaded once at
/// startup. Only the sync coordinator writes to it, and only after a
/// confirmed backend effect.
#[derive(Debug, Default)]
pub struct RecordCache {
    records: Vec<CredentialRecord>,
}

impl RecordCache {
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn append(&mut self, record: CredentialRecord) {
        self.records.push(record);
    }

    /// Replace the entry carrying the record's id, keeping its position;
    /// append when absent (an entry unlisted by entering edit mode).
    pub fn upsert(&mut self, record: CredentialRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() < before
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
