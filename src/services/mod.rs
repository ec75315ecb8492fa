//! Service layer: session validation, authorization, record CRUD.

pub mod authz;
pub mod record;
pub mod session;
