//! Page-window and list-request model.
//!
//! DESIGN
//! ======
//! The list view retrieves exactly one page window per fetch. `Pager` owns
//! the transient UI state (page index, page size, filter) and translates it
//! into the wire body the list endpoint expects. It also issues monotonically
//! increasing fetch tokens: overlapping fetches are never cancelled, so a
//! response is applied only when its token is still the latest issued.

use serde::{Deserialize, Serialize};

/// The fixed page-size option set offered by the pagination controls.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [15, 25, 50, 100];

const DEFAULT_PAGE_SIZE: usize = 15;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Retrieval mode: `between` is a bare window, `range` carries filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    Between,
    Range,
}

/// Caller-supplied filter criteria, an open-ended field -> criterion map.
pub type FilterQuery = serde_json::Map<String, serde_json::Value>;

/// Body of the list endpoint: `{from, to, type, ...filter}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequest {
    pub from: i64,
    pub to: i64,
    #[serde(rename = "type")]
    pub mode: ListMode,
    #[serde(flatten)]
    pub filter: FilterQuery,
}

/// Half-open record slice `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub from: i64,
    pub to: i64,
}

// =============================================================================
// FETCH TOKEN
// =============================================================================

/// Sequencing token for one fetch. Monotonic per pager; stale tokens identify
/// responses that must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

// =============================================================================
// PAGER
// =============================================================================

/// Pagination state for one list view.
#[derive(Debug, Clone)]
pub struct Pager {
    page: usize,
    page_size: usize,
    filter: Option<FilterQuery>,
    seq: u64,
}

impl Pager {
    #[must_use]
    pub fn new() -> Self {
        Self { page: 0, page_size: DEFAULT_PAGE_SIZE, filter: None, seq: 0 }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn filter(&self) -> Option<&FilterQuery> {
        self.filter.as_ref()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Jump to the last page for a collection of `count` records.
    pub fn last_page(&mut self, count: usize) {
        self.page = count.div_ceil(self.page_size).saturating_sub(1);
    }

    /// Change the page size. Values outside the fixed option set are ignored.
    /// A size change always resets to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return;
        }
        self.page_size = size;
        self.page = 0;
    }

    pub fn set_filter(&mut self, filter: Option<FilterQuery>) {
        self.filter = filter;
    }

    /// The record window for the current page: `[page*size, page*size+size)`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn window(&self) -> PageWindow {
        let from = (self.page * self.page_size) as i64;
        let to = from + self.page_size as i64;
        PageWindow { from, to }
    }

    /// Build the list request body for the current page and filter.
    #[must_use]
    pub fn request(&self) -> ListRequest {
        let window = self.window();
        match &self.filter {
            None => ListRequest {
                from: window.from,
                to: window.to,
                mode: ListMode::Between,
                filter: FilterQuery::new(),
            },
            Some(filter) => ListRequest {
                from: window.from,
                to: window.to,
                mode: ListMode::Range,
                filter: filter.clone(),
            },
        }
    }

    /// Issue a token for a fetch about to start. Invalidates all prior tokens.
    pub fn issue_token(&mut self) -> FetchToken {
        self.seq += 1;
        FetchToken(self.seq)
    }

    /// Whether `token` is still the latest issued.
    #[must_use]
    pub fn is_current(&self, token: FetchToken) -> bool {
        token.0 == self.seq
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
