//! Authorization predicate for record mutations.
//!
//! Edit and delete rights are decided in exactly one place, independent of
//! any rendering or handler code: a privileged user may mutate any record,
//! a regular member only records they uploaded.

use crate::services::session::{Role, SessionUser};

/// Whether `user` may edit or delete a record uploaded by `owner_email`.
#[must_use]
pub fn can_edit(user: &SessionUser, owner_email: &str) -> bool {
    user.role == Role::Privileged || user.email == owner_email
}

#[cfg(test)]
#[path = "authz_test.rs"]
mod tests;
