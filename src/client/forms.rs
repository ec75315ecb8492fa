//! Add/edit form flows and the delete confirmation.
//!
//! DESIGN
//! ======
//! Each form is a small state machine: closed/open plus an in-flight flag.
//! Submission is gated client-side on the required fields; the payload merges
//! the draft with the acting user's email and the kind discriminator. A
//! successful submit closes the form (and clears the draft for adds); a
//! failed submit logs and retains the input so nothing the user typed is
//! lost. Results are returned to the caller, which owns the displayed rows.

use crate::client::api::{CreatePayload, RecordsApi, UpdatePayload};
use crate::records::{Attachment, Record, RecordKind, RecordStatus};
use crate::services::session::SessionUser;

// =============================================================================
// DRAFT
// =============================================================================

/// Local form state for one record.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub title: String,
    pub description: String,
    pub status: Option<RecordStatus>,
    pub attachments: Vec<Attachment>,
    /// Kind-specific fields (funding agency, venue, ...).
    pub props: serde_json::Map<String, serde_json::Value>,
}

impl RecordDraft {
    /// Blank draft for a kind. Projects start as `Ongoing`, matching the
    /// default option the form presents.
    #[must_use]
    pub fn blank(kind: RecordKind) -> Self {
        Self {
            status: if kind == RecordKind::Project { Some(RecordStatus::Ongoing) } else { None },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            status: record.status,
            attachments: record.attachments.clone(),
            props: record
                .props
                .as_object()
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Required-field validation; submission stays disabled until satisfied.
    #[must_use]
    pub fn required_complete(&self, kind: RecordKind) -> bool {
        if self.title.trim().is_empty() {
            return false;
        }
        kind != RecordKind::Project || self.status.is_some()
    }
}

// =============================================================================
// ADD FORM
// =============================================================================

pub struct AddForm {
    kind: RecordKind,
    open: bool,
    submitting: bool,
    pub draft: RecordDraft,
}

impl AddForm {
    #[must_use]
    pub fn new(kind: RecordKind) -> Self {
        Self { kind, open: false, submitting: false, draft: RecordDraft::blank(kind) }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.draft.required_complete(self.kind)
    }

    /// Submit the draft as a new record. Returns the created record on
    /// success; on failure the form stays open with the draft retained.
    pub async fn submit<A: RecordsApi + ?Sized>(&mut self, api: &A, session: &SessionUser) -> Option<Record> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;

        let payload = CreatePayload {
            kind: self.kind,
            id: None,
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            email: session.email.clone(),
            status: self.draft.status,
            attachments: self.draft.attachments.clone(),
            props: self.draft.props.clone(),
        };
        let result = api.create(&payload).await;
        self.submitting = false;

        match result {
            Ok(record) => {
                self.open = false;
                self.draft = RecordDraft::blank(self.kind);
                Some(record)
            }
            Err(e) => {
                tracing::error!(error = %e, kind = self.kind.as_str(), "create failed; form input retained");
                None
            }
        }
    }
}

// =============================================================================
// EDIT FORM
// =============================================================================

pub struct EditForm {
    kind: RecordKind,
    id: String,
    open: bool,
    submitting: bool,
    pub draft: RecordDraft,
}

impl EditForm {
    /// Open an edit form prefilled from an existing record.
    #[must_use]
    pub fn for_record(record: &Record) -> Self {
        Self {
            kind: record.kind,
            id: record.id.clone(),
            open: true,
            submitting: false,
            draft: RecordDraft::from_record(record),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.draft.required_complete(self.kind)
    }

    /// Submit the edited draft. Returns the updated record on success; on
    /// failure the form stays open with the edits retained.
    pub async fn submit<A: RecordsApi + ?Sized>(&mut self, api: &A, session: &SessionUser) -> Option<Record> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;

        let payload = UpdatePayload {
            kind: self.kind,
            id: self.id.clone(),
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            email: session.email.clone(),
            status: self.draft.status,
            attachments: self.draft.attachments.clone(),
            props: self.draft.props.clone(),
        };
        let result = api.update(&payload).await;
        self.submitting = false;

        match result {
            Ok(record) => {
                self.open = false;
                Some(record)
            }
            Err(e) => {
                tracing::error!(error = %e, id = %self.id, "update failed; form input retained");
                None
            }
        }
    }
}

// =============================================================================
// DELETE CONFIRMATION
// =============================================================================

/// Blocking yes/no confirmation for one record. No undo.
pub struct DeleteConfirm {
    kind: RecordKind,
    id: String,
    open: bool,
    deleting: bool,
}

impl DeleteConfirm {
    #[must_use]
    pub fn new(kind: RecordKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into(), open: true, deleting: false }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Issue the delete call. Returns true on success (the caller refreshes
    /// or removes the row); on failure the dialog closes and the row stays.
    pub async fn confirm<A: RecordsApi + ?Sized>(&mut self, api: &A, session: &SessionUser) -> bool {
        if self.deleting {
            return false;
        }
        self.deleting = true;
        let result = api.delete(self.kind, &self.id, &session.email).await;
        self.deleting = false;
        self.open = false;

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, id = %self.id, "delete failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
