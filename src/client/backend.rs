use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::client::error::BackendError;
use crate::records::model::{CredentialRecord, Envelope, RecordFields};

/// Request timeout for the remote store. The UI never cancels an in-flight
/// request, so the transport has to bound it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The persistence capability the sync coordinator is written against.
/// Two adapters: the HTTP record service and a device-local blob file.
#[async_trait]
pub trait VaultBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<CredentialRecord>, BackendError>;

    /// The backend assigns the id; the caller never picks one.
    async fn create(&self, fields: &RecordFields) -> Result<CredentialRecord, BackendError>;

    async fn update(&self, id: Uuid, fields: &RecordFields) -> Result<(), BackendError>;

    /// Idempotent: deleting an absent id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), BackendError>;
}

fn rejection<T>(envelope: Envelope<T>) -> BackendError {
    BackendError::Rejected(
        envelope
            .message
            .unwrap_or_else(|| "store reported failure".into()),
    )
}

/// Adapter for the HTTP record service.
pub struct RemoteVault {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteVault {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl VaultBackend for RemoteVault {
    async fn list(&self) -> Result<Vec<CredentialRecord>, BackendError> {
        let records: Vec<CredentialRecord> = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .json()
            .await?;
        debug!(count = records.len(), "fetched records");
        Ok(records)
    }

    async fn create(&self, fields: &RecordFields) -> Result<CredentialRecord, BackendError> {
        let envelope: Envelope<CredentialRecord> = self
            .client
            .post(&self.base_url)
            .json(fields)
            .send()
            .await?
            .json()
            .await?;
        match envelope.result {
            Some(record) if envelope.success => Ok(record),
            _ => Err(rejection(envelope)),
        }
    }

    async fn update(&self, id: Uuid, fields: &RecordFields) -> Result<(), BackendError> {
        let body = json!({
            "id": id,
            "site": fields.site,
            "username": fields.username,
            "password": fields.password,
        });
        let envelope: Envelope<CredentialRecord> = self
            .client
            .put(&self.base_url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        if envelope.success {
            Ok(())
        } else {
            Err(rejection(envelope))
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), BackendError> {
        let envelope: Envelope<serde_json::Value> = self
            .client
            .delete(&self.base_url)
            .json(&json!({ "id": id }))
            .send()
            .await?
            .json()
            .await?;
        if envelope.success {
            Ok(())
        } else {
            Err(rejection(envelope))
        }
    }
}

/// Adapter for the device-local vault: the whole collection as one JSON
/// blob, read once at open and rewritten in full on every mutation.
pub struct LocalVault {
    path: PathBuf,
    records: Mutex<Vec<CredentialRecord>>,
}

impl LocalVault {
    pub fn open(path: PathBuf) -> Result<Self, BackendError> {
        let records = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Well-known location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("passkeep").join("passwords.json"))
    }

    fn persist(&self, records: &[CredentialRecord]) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(records)?)?;
        Ok(())
    }
}

#[async_trait]
impl VaultBackend for LocalVault {
    async fn list(&self) -> Result<Vec<CredentialRecord>, BackendError> {
        Ok(self.records.lock().expect("vault lock poisoned").clone())
    }

    async fn create(&self, fields: &RecordFields) -> Result<CredentialRecord, BackendError> {
        let record = CredentialRecord::from_fields(Uuid::new_v4(), fields.clone());
        let mut records = self.records.lock().expect("vault lock poisoned");
        let mut next = records.clone();
        next.push(record.clone());
        self.persist(&next)?;
        *records = next;
        Ok(record)
    }

    async fn update(&self, id: Uuid, fields: &RecordFields) -> Result<(), BackendError> {
        let mut records = self.records.lock().expect("vault lock poisoned");
        let mut next = records.clone();
        let Some(record) = next.iter_mut().find(|r| r.id == id) else {
            return Err(BackendError::Rejected("No changes made".into()));
        };
        record.site = fields.site.clone();
        record.username = fields.username.clone();
        record.password = fields.password.clone();
        self.persist(&next)?;
        *records = next;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), BackendError> {
        let mut records = self.records.lock().expect("vault lock poisoned");
        let mut next = records.clone();
        next.retain(|r| r.id != id);
        self.persist(&next)?;
        *records = next;
        Ok(())
    }
}
