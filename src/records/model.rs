use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored credential. The id is assigned by the store at creation time
/// and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CredentialRecord {
    pub id: Uuid,
    pub site: String,
    pub username: String,
    pub password: String,
}

/// The id-less content triple: create/update payload and the form draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub site: String,
    pub username: String,
    pub password: String,
}

impl RecordFields {
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialRecord {
    pub fn from_fields(id: Uuid, fields: RecordFields) -> Self {
        Self {
            id,
            site: fields.site,
            username: fields.username,
            password: fields.password,
        }
    }

    pub fn fields(&self) -> RecordFields {
        RecordFields {
            site: self.site.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Uniform response wrapper for every mutating endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            message: Some(message.into()),
        }
    }
}
