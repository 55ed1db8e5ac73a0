use async_trait::async_trait;

/// Transient user-facing notification.
pub trait Notify: Send + Sync {
    fn notify(&self, message: &str);
}

/// Yes/no gate. Async so the caller suspends on the answer instead of
/// blocking the scheduler.
#[async_trait]
pub trait ConfirmAction: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Clipboard write for the per-field copy action.
pub trait ClipboardWrite: Send + Sync {
    fn copy(&self, text: &str) -> anyhow::Result<()>;
}
