//! Record management panel: the parent component of the UI tree.
//!
//! DESIGN
//! ======
//! The panel owns the displayed rows and every mutation applier; child forms
//! return their results and the panel applies them. Nothing is published to
//! any process-wide scope — the only way a form affects the list is through
//! the panel that created it.

use crate::client::api::RecordsApi;
use crate::client::forms::{AddForm, DeleteConfirm, EditForm};
use crate::client::list_view::ListView;
use crate::records::{Record, RecordKind};
use crate::services::authz;
use crate::services::session::SessionUser;

pub struct RecordPanel {
    session: SessionUser,
    pub list: ListView,
    pub add: AddForm,
    pub edit: Option<EditForm>,
    pub confirm: Option<DeleteConfirm>,
}

impl RecordPanel {
    #[must_use]
    pub fn new(kind: RecordKind, session: SessionUser) -> Self {
        Self {
            session,
            list: ListView::new(kind),
            add: AddForm::new(kind),
            edit: None,
            confirm: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionUser {
        &self.session
    }

    // =========================================================================
    // MODAL OPENERS
    // =========================================================================

    pub fn open_add(&mut self) {
        self.add.open();
    }

    /// Open the edit form for a row, if the acting user is allowed to edit it.
    pub fn open_edit(&mut self, record: &Record) -> bool {
        if !authz::can_edit(&self.session, &record.email) {
            return false;
        }
        self.edit = Some(EditForm::for_record(record));
        true
    }

    pub fn open_delete(&mut self, record: &Record) -> bool {
        if !authz::can_edit(&self.session, &record.email) {
            return false;
        }
        self.confirm = Some(DeleteConfirm::new(record.kind, record.id.clone()));
        true
    }

    // =========================================================================
    // MUTATION APPLIERS (owned here, passed results by the forms)
    // =========================================================================

    pub fn apply_created(&mut self, record: Record) {
        self.list.push(record);
    }

    pub fn apply_updated(&mut self, record: Record) {
        self.list.replace(record);
    }

    pub fn apply_deleted(&mut self, id: &str) {
        self.list.remove(id);
    }

    // =========================================================================
    // FLOWS
    // =========================================================================

    /// Drive the add form to completion and apply the result.
    pub async fn submit_add<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        let result = self.add.submit(api, &self.session).await;
        if let Some(record) = result {
            self.apply_created(record);
        }
    }

    /// Drive the open edit form to completion and apply the result.
    pub async fn submit_edit<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        let Some(mut form) = self.edit.take() else {
            return;
        };
        let result = form.submit(api, &self.session).await;
        match result {
            Some(record) => self.apply_updated(record),
            None => self.edit = Some(form),
        }
    }

    /// Drive the open delete confirmation; on success the id disappears from
    /// the displayed collection.
    pub async fn confirm_delete<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        let Some(mut confirm) = self.confirm.take() else {
            return;
        };
        if confirm.confirm(api, &self.session).await {
            let id = confirm.id().to_owned();
            self.apply_deleted(&id);
        }
    }
}

#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;
