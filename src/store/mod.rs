mod memory;
mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

use axum::async_trait;
use uuid::Uuid;

use crate::records::model::{CredentialRecord, RecordFields};

/// Durable keyed collection of credential records. The store is the single
/// source of truth for record identifiers: `create` assigns the id, `update`
/// preserves it. A missing id on `update`/`delete` is reported through the
/// return value, not as an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<CredentialRecord>>;

    async fn create(&self, fields: RecordFields) -> anyhow::Result<CredentialRecord>;

    /// Returns false when no record with that id exists.
    async fn update(&self, id: Uuid, fields: RecordFields) -> anyhow::Result<bool>;

    /// Returns the number of records removed (0 or 1).
    async fn delete(&self, id: Uuid) -> anyhow::Result<u64>;
}
