//! Faculty portal: REST backend plus headless UI flows for the faculty
//! records site (innovations, events, sponsored projects).
//!
//! The server half exposes windowed list retrieval and CRUD over a Postgres
//! `records` table with session-based role checks. The client half carries
//! the UI contract — pagination, form state machines, delete confirmation —
//! without any rendering attached.

pub mod client;
pub mod db;
pub mod listing;
pub mod records;
pub mod routes;
pub mod services;
pub mod state;
