use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered but refused the operation (envelope success=false).
    #[error("{0}")]
    Rejected(String),

    #[error("vault file i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed vault data: {0}")]
    Codec(#[from] serde_json::Error),
}
