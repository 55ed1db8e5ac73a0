pub mod backend;
pub mod cache;
pub mod caps;
pub mod error;
pub mod form;
pub mod sync;
pub mod terminal;

pub use backend::{LocalVault, RemoteVault, VaultBackend};
pub use cache::RecordCache;
pub use error::BackendError;
pub use form::{CredentialForm, FormMode};
pub use sync::SyncCoordinator;
