//! Paginated list view controller.
//!
//! DESIGN
//! ======
//! A fetch cycle is `begin_fetch` (snapshot the request and issue a token)
//! followed by `apply` once the response arrives. Overlapping fetches are
//! never cancelled; `apply` drops any response whose token is no longer the
//! latest, so rapid page/size/filter changes cannot interleave into a stale
//! display. Errors keep the previously displayed rows.

use crate::client::api::RecordsApi;
use crate::listing::{FetchToken, FilterQuery, ListRequest, Pager};
use crate::records::{Record, RecordKind};
use crate::services::authz;
use crate::services::session::SessionUser;

pub struct ListView {
    kind: RecordKind,
    pager: Pager,
    rows: Vec<Record>,
}

impl ListView {
    #[must_use]
    pub fn new(kind: RecordKind) -> Self {
        Self { kind, pager: Pager::new(), rows: Vec::new() }
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    #[must_use]
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn set_filter(&mut self, filter: Option<FilterQuery>) {
        self.pager.set_filter(filter);
    }

    /// Start a fetch: returns the request for the current window plus the
    /// token the response must present to be applied.
    pub fn begin_fetch(&mut self) -> (FetchToken, ListRequest) {
        (self.pager.issue_token(), self.pager.request())
    }

    /// Apply a fetch response. Returns false (and changes nothing) when the
    /// token has been superseded by a newer fetch.
    pub fn apply(&mut self, token: FetchToken, rows: Vec<Record>) -> bool {
        if !self.pager.is_current(token) {
            tracing::debug!(kind = self.kind.as_str(), "discarding stale list response");
            return false;
        }
        self.rows = rows;
        true
    }

    /// One full fetch cycle against the API. On failure the previous rows
    /// stay on display.
    pub async fn refresh<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        let (token, req) = self.begin_fetch();
        match api.list(self.kind, &req).await {
            Ok(rows) => {
                self.apply(token, rows);
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = self.kind.as_str(), "list fetch failed; keeping previous rows");
            }
        }
    }

    /// Append a freshly created record to the display.
    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// Drop a deleted record from the display without waiting for a refetch.
    pub fn remove(&mut self, id: &str) {
        self.rows.retain(|record| record.id != id);
    }

    /// Replace a row in place after an edit.
    pub fn replace(&mut self, updated: Record) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == updated.id) {
            *row = updated;
        }
    }

    /// Whether the edit affordance is shown for the row at `index`.
    #[must_use]
    pub fn edit_allowed(&self, user: &SessionUser, index: usize) -> bool {
        self.rows
            .get(index)
            .is_some_and(|record| authz::can_edit(user, &record.email))
    }
}

#[cfg(test)]
#[path = "list_view_test.rs"]
mod tests;
