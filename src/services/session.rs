//! Read-only session validation.
//!
//! ARCHITECTURE
//! ============
//! Session rows are created and expired by the external identity provider.
//! The portal only resolves a cookie token to the acting user's email and
//! role; it never writes to the sessions table.

use sqlx::{PgPool, Row};

/// Portal role decoded from the numeric level the identity provider stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Privileged,
}

const PRIVILEGED_LEVEL: i32 = 1;

impl Role {
    /// Level 1 is privileged; every other level is a regular member.
    #[must_use]
    pub fn from_level(level: i32) -> Self {
        if level == PRIVILEGED_LEVEL {
            Self::Privileged
        } else {
            Self::Member
        }
    }
}

/// The acting user resolved from a session token.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    pub email: String,
    pub role: Role,
}

/// Validate a session token and return the associated user.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query("SELECT email, role FROM sessions WHERE token = $1 AND expires_at > now()")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| SessionUser { email: r.get("email"), role: Role::from_level(r.get("role")) }))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
