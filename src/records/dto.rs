use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub site: String,
    pub username: String,
    pub password: String,
}

/// Every field optional: presence is checked by the handler so a missing
/// field yields the 400 envelope instead of a body rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateRecordRequest {
    pub id: Option<Uuid>,
    pub site: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRecordRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResult {
    pub deleted_count: u64,
}
