use uuid::Uuid;

use crate::records::model::{CredentialRecord, RecordFields};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    /// Bound to the record under edit; carrying the id here is what keeps
    /// at most one edit in flight.
    Edit(Uuid),
}

/// The single editable draft record.
#[derive(Debug, Default)]
pub struct CredentialForm {
    pub draft: RecordFields,
    mode: FormMode,
    reveal_password: bool,
}

impl CredentialForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Load a record into the draft and switch to edit mode.
    pub fn begin_edit(&mut self, record: &CredentialRecord) {
        self.draft = record.fields();
        self.mode = FormMode::Edit(record.id);
    }

    /// Admission rule: every field strictly longer than 3 characters.
    /// An inadmissible draft must never reach the backend.
    pub fn is_admissible(&self) -> bool {
        self.draft.site.len() > 3 && self.draft.username.len() > 3 && self.draft.password.len() > 3
    }

    /// Back to an empty create-mode draft. Called only after a confirmed
    /// successful save.
    pub fn reset(&mut self) {
        self.draft = RecordFields::default();
        self.mode = FormMode::Create;
    }

    /// Presentation only; the draft password itself is never touched.
    pub fn toggle_reveal(&mut self) {
        self.reveal_password = !self.reveal_password;
    }

    pub fn password_revealed(&self) -> bool {
        self.reveal_password
    }
}
