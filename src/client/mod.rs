//! Headless client layer for the portal UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! These types carry the UI contract without any rendering: the paginated
//! list view, the add/edit form flows, and the delete confirmation. A
//! frontend binds them to widgets; tests drive them against a mock API.

pub mod api;
pub mod forms;
pub mod list_view;
pub mod panel;
