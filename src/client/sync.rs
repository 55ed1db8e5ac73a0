use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::backend::VaultBackend;
use crate::client::cache::RecordCache;
use crate::client::caps::{ConfirmAction, Notify};
use crate::client::error::BackendError;
use crate::client::form::{CredentialForm, FormMode};
use crate::records::model::CredentialRecord;

/// Applies every user mutation to the backend first and to the cache only
/// after the backend confirmed it. Never optimistic, never partial.
pub struct SyncCoordinator {
    backend: Arc<dyn VaultBackend>,
    notify: Arc<dyn Notify>,
    confirm: Arc<dyn ConfirmAction>,
    unlist_on_edit: bool,
}

impl SyncCoordinator {
    pub fn new(
        backend: Arc<dyn VaultBackend>,
        notify: Arc<dyn Notify>,
        confirm: Arc<dyn ConfirmAction>,
        unlist_on_edit: bool,
    ) -> Self {
        Self {
            backend,
            notify,
            confirm,
            unlist_on_edit,
        }
    }

    /// One-time startup load of the cache from the backend.
    pub async fn load(&self) -> Result<RecordCache, BackendError> {
        Ok(RecordCache::new(self.backend.list().await?))
    }

    /// Start editing the cached record with that id. Unknown ids are a
    /// no-op. In local mode the record leaves the visible list immediately
    /// and silently; the persisted blob keeps it, so the id survives an
    /// abandoned edit and the later update still matches.
    pub fn begin_edit(&self, id: Uuid, form: &mut CredentialForm, cache: &mut RecordCache) -> bool {
        let Some(record) = cache.get(id) else {
            debug!(%id, "edit requested for unknown record");
            return false;
        };
        form.begin_edit(record);
        if self.unlist_on_edit {
            cache.remove(id);
        }
        true
    }

    /// Commit the draft. Returns true when the cache was mutated.
    pub async fn save(&self, form: &mut CredentialForm, cache: &mut RecordCache) -> bool {
        if !form.is_admissible() {
            self.notify
                .notify("Error: fill all fields with more than 3 characters");
            return false;
        }

        match form.mode() {
            FormMode::Create => match self.backend.create(&form.draft).await {
                Ok(record) => {
                    cache.append(record);
                    form.reset();
                    self.notify.notify("Password saved!");
                    true
                }
                Err(e) => {
                    warn!(error = %e, "save failed");
                    self.notify.notify(&format!("Failed to save password: {e}"));
                    false
                }
            },
            FormMode::Edit(id) => match self.backend.update(id, &form.draft).await {
                Ok(()) => {
                    cache.upsert(CredentialRecord::from_fields(id, form.draft.clone()));
                    form.reset();
                    self.notify.notify("Password updated!");
                    true
                }
                Err(e) => {
                    warn!(error = %e, %id, "update failed");
                    self.notify
                        .notify(&format!("Failed to update password: {e}"));
                    false
                }
            },
        }
    }

    /// Confirmation-gated delete. Returns true when the cache was mutated.
    pub async fn delete(&self, id: Uuid, cache: &mut RecordCache) -> bool {
        if !self
            .confirm
            .confirm("Do you really want to delete this password?")
            .await
        {
            debug!(%id, "delete declined");
            return false;
        }

        match self.backend.delete(id).await {
            Ok(()) => {
                cache.remove(id);
                self.notify.notify("Password deleted!");
                true
            }
            Err(e) => {
                warn!(error = %e, %id, "delete failed");
                self.notify
                    .notify(&format!("Failed to delete password: {e}"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::records::model::RecordFields;

    #[derive(Default)]
    struct MockBackend {
        create_calls: AtomicUsize,
        update_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        fail: bool,
    }

    impl MockBackend {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn refusal<T>(&self) -> Result<T, BackendError> {
            Err(BackendError::Rejected("Server Error".into()))
        }
    }

    #[async_trait]
    impl VaultBackend for MockBackend {
        async fn list(&self) -> Result<Vec<CredentialRecord>, BackendError> {
            Ok(Vec::new())
        }

        async fn create(&self, fields: &RecordFields) -> Result<CredentialRecord, BackendError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return self.refusal();
            }
            Ok(CredentialRecord::from_fields(
                Uuid::new_v4(),
                fields.clone(),
            ))
        }

        async fn update(&self, _id: Uuid, _fields: &RecordFields) -> Result<(), BackendError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return self.refusal();
            }
            Ok(())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), BackendError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return self.refusal();
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotify {
        messages: Mutex<Vec<String>>,
    }

    impl Notify for RecordingNotify {
        fn notify(&self, message: &str) {
            self.messages
                .lock()
                .expect("messages lock poisoned")
                .push(message.to_string());
        }
    }

    struct ScriptedConfirm(bool);

    #[async_trait]
    impl ConfirmAction for ScriptedConfirm {
        async fn confirm(&self, _prompt: &str) -> bool {
            self.0
        }
    }

    struct Fixture {
        backend: Arc<MockBackend>,
        notify: Arc<RecordingNotify>,
        coordinator: SyncCoordinator,
    }

    fn fixture(backend: MockBackend, confirm: bool, unlist_on_edit: bool) -> Fixture {
        let backend = Arc::new(backend);
        let notify = Arc::new(RecordingNotify::default());
        let coordinator = SyncCoordinator::new(
            backend.clone(),
            notify.clone(),
            Arc::new(ScriptedConfirm(confirm)),
            unlist_on_edit,
        );
        Fixture {
            backend,
            notify,
            coordinator,
        }
    }

    fn cached_record() -> CredentialRecord {
        CredentialRecord::from_fields(
            Uuid::new_v4(),
            RecordFields::new("https://a.com", "bob12", "secret1"),
        )
    }

    #[tokio::test]
    async fn inadmissible_draft_never_reaches_the_backend() {
        let f = fixture(MockBackend::default(), true, false);
        let mut cache = RecordCache::default();
        let mut form = CredentialForm::new();
        form.draft = RecordFields::new("abc", "bob12", "secret1");

        assert!(!f.coordinator.save(&mut form, &mut cache).await);
        assert_eq!(f.backend.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.backend.update_calls.load(Ordering::SeqCst), 0);
        assert!(cache.is_empty());
        // the draft survives for correction
        assert_eq!(form.draft.site, "abc");
    }

    #[tokio::test]
    async fn create_appends_the_backend_assigned_record_and_resets() {
        let f = fixture(MockBackend::default(), true, false);
        let mut cache = RecordCache::default();
        let mut form = CredentialForm::new();
        form.draft = RecordFields::new("example.com", "alice1", "p@ssw0rd");

        assert!(f.coordinator.save(&mut form, &mut cache).await);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.records()[0].username, "alice1");
        assert!(!cache.records()[0].id.is_nil());
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.draft, RecordFields::default());
    }

    #[tokio::test]
    async fn failed_create_leaves_cache_and_draft_alone() {
        let f = fixture(MockBackend::failing(), true, false);
        let mut cache = RecordCache::default();
        let mut form = CredentialForm::new();
        form.draft = RecordFields::new("example.com", "alice1", "p@ssw0rd");

        assert!(!f.coordinator.save(&mut form, &mut cache).await);
        assert!(cache.is_empty());
        assert_eq!(form.draft.username, "alice1");
        let messages = f.notify.messages.lock().unwrap();
        assert!(messages[0].starts_with("Failed to save"));
    }

    #[tokio::test]
    async fn edit_save_replaces_under_the_same_id() {
        let record = cached_record();
        let f = fixture(MockBackend::default(), true, false);
        let mut cache = RecordCache::new(vec![record.clone()]);
        let mut form = CredentialForm::new();

        assert!(f.coordinator.begin_edit(record.id, &mut form, &mut cache));
        // still listed in remote mode
        assert_eq!(cache.len(), 1);

        form.draft.password = "newpass1".into();
        assert!(f.coordinator.save(&mut form, &mut cache).await);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.records()[0].id, record.id);
        assert_eq!(cache.records()[0].password, "newpass1");
        assert_eq!(f.backend.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.backend.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_update_keeps_the_cache_entry() {
        let record = cached_record();
        let f = fixture(MockBackend::failing(), true, false);
        let mut cache = RecordCache::new(vec![record.clone()]);
        let mut form = CredentialForm::new();

        f.coordinator.begin_edit(record.id, &mut form, &mut cache);
        form.draft.password = "newpass1".into();
        assert!(!f.coordinator.save(&mut form, &mut cache).await);

        assert_eq!(cache.records()[0], record);
        // edit stays in flight so the user can retry
        assert_eq!(form.mode(), FormMode::Edit(record.id));
    }

    #[tokio::test]
    async fn begin_edit_unknown_id_is_a_noop() {
        let f = fixture(MockBackend::default(), true, false);
        let mut cache = RecordCache::default();
        let mut form = CredentialForm::new();

        assert!(!f.coordinator.begin_edit(Uuid::new_v4(), &mut form, &mut cache));
        assert_eq!(form.mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn local_mode_unlists_on_edit_and_save_restores_the_id() {
        let record = cached_record();
        let f = fixture(MockBackend::default(), true, true);
        let mut cache = RecordCache::new(vec![record.clone()]);
        let mut form = CredentialForm::new();

        assert!(f.coordinator.begin_edit(record.id, &mut form, &mut cache));
        // gone from the visible list before any commit
        assert!(cache.is_empty());

        form.draft.password = "newpass1".into();
        assert!(f.coordinator.save(&mut form, &mut cache).await);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.records()[0].id, record.id);
        assert_eq!(cache.records()[0].password, "newpass1");
    }

    #[tokio::test]
    async fn abandoned_local_edit_stays_unlisted() {
        let record = cached_record();
        let f = fixture(MockBackend::default(), true, true);
        let mut cache = RecordCache::new(vec![record.clone()]);
        let mut form = CredentialForm::new();

        f.coordinator.begin_edit(record.id, &mut form, &mut cache);
        // no commit ever happens; the visible list stays without the record
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn declined_confirmation_skips_the_backend() {
        let record = cached_record();
        let f = fixture(MockBackend::default(), false, false);
        let mut cache = RecordCache::new(vec![record.clone()]);

        assert!(!f.coordinator.delete(record.id, &mut cache).await);
        assert_eq!(f.backend.delete_calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_from_cache() {
        let record = cached_record();
        let f = fixture(MockBackend::default(), true, false);
        let mut cache = RecordCache::new(vec![record.clone()]);

        assert!(f.coordinator.delete(record.id, &mut cache).await);
        assert_eq!(f.backend.delete_calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn failed_delete_leaves_cache_unchanged() {
        let record = cached_record();
        let f = fixture(MockBackend::failing(), true, false);
        let mut cache = RecordCache::new(vec![record.clone()]);

        assert!(!f.coordinator.delete(record.id, &mut cache).await);
        assert_eq!(cache.records(), &[record]);
    }
}
