//! Record service — windowed list retrieval and CRUD.
//!
//! DESIGN
//! ======
//! One `records` table backs all three portal kinds. List retrieval takes
//! the wire window `[from, to)` directly (LIMIT/OFFSET, newest first) and
//! translates the known filter keys in range mode. Mutations enforce the
//! authorization predicate here, not in the handlers, so every route shares
//! the same rule.

use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::listing::{ListMode, ListRequest};
use crate::records::{Attachment, AttachmentField, Record, RecordKind, RecordStatus, now_ms};
use crate::services::authz;
use crate::services::session::SessionUser;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("not allowed to modify record: {0}")]
    Forbidden(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fields for a record about to be created. The server mints the id and
/// timestamp when the caller does not supply an id.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub kind: RecordKind,
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub email: String,
    pub status: Option<RecordStatus>,
    pub attachments: Vec<Attachment>,
    pub props: serde_json::Value,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct RecordPatch {
    pub kind: RecordKind,
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<RecordStatus>,
    pub attachments: Option<Vec<Attachment>>,
    pub props: Option<serde_json::Value>,
}

// =============================================================================
// LIST
// =============================================================================

/// LIMIT/OFFSET for a wire window. `None` when the window is empty.
#[must_use]
pub(crate) fn window_limits(from: i64, to: i64) -> Option<(i64, i64)> {
    let offset = from.max(0);
    let limit = to - offset;
    if limit <= 0 { None } else { Some((limit, offset)) }
}

/// Retrieve one page window of records, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_window(pool: &PgPool, kind: RecordKind, req: &ListRequest) -> Result<Vec<Record>, RecordError> {
    let Some((limit, offset)) = window_limits(req.from, req.to) else {
        return Ok(Vec::new());
    };

    let mut builder = QueryBuilder::new(
        "SELECT id, kind, title, description, email, updated_by, ts, status, attachments, props
         FROM records WHERE kind = ",
    );
    builder.push_bind(kind.as_str());

    if req.mode == ListMode::Range {
        push_filter_clauses(&mut builder, &req.filter);
    }

    builder.push(" ORDER BY ts DESC, id ASC LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);

    let rows = builder.build_query_as::<RecordRow>().fetch_all(pool).await?;
    Ok(rows.into_iter().filter_map(row_to_record).collect())
}

/// Translate known filter keys into WHERE clauses; unknown keys are ignored.
fn push_filter_clauses(builder: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &crate::listing::FilterQuery) {
    if let Some(title) = filter.get("title").and_then(serde_json::Value::as_str) {
        builder.push(" AND title ILIKE ");
        builder.push_bind(format!("%{title}%"));
    }
    if let Some(email) = filter.get("email").and_then(serde_json::Value::as_str) {
        builder.push(" AND email = ");
        builder.push_bind(email.to_owned());
    }
    if let Some(status) = filter.get("status").and_then(serde_json::Value::as_str) {
        builder.push(" AND status = ");
        builder.push_bind(status.to_owned());
    }
    if let Some(from_date) = filter.get("from_date").and_then(serde_json::Value::as_i64) {
        builder.push(" AND ts >= ");
        builder.push_bind(from_date);
    }
    if let Some(to_date) = filter.get("to_date").and_then(serde_json::Value::as_i64) {
        builder.push(" AND ts <= ");
        builder.push_bind(to_date);
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// Create a record.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_record(pool: &PgPool, input: NewRecord) -> Result<Record, RecordError> {
    let record = Record {
        id: input.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        kind: input.kind,
        title: input.title,
        description: input.description,
        email: input.email,
        updated_by: None,
        timestamp: now_ms(),
        status: input.status,
        attachments: input.attachments,
        props: if input.props.is_null() { serde_json::json!({}) } else { input.props },
    };

    sqlx::query(
        "INSERT INTO records (id, kind, title, description, email, updated_by, ts, status, attachments, props)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(&record.id)
    .bind(record.kind.as_str())
    .bind(&record.title)
    .bind(&record.description)
    .bind(&record.email)
    .bind(record.updated_by.as_deref())
    .bind(record.timestamp)
    .bind(record.status.map(RecordStatus::as_str))
    .bind(encode_attachments(&record.attachments))
    .bind(&record.props)
    .execute(pool)
    .await?;

    Ok(record)
}

/// Fetch one record by kind and id.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn fetch_record(pool: &PgPool, kind: RecordKind, id: &str) -> Result<Option<Record>, RecordError> {
    let row = sqlx::query_as::<_, RecordRow>(
        "SELECT id, kind, title, description, email, updated_by, ts, status, attachments, props
         FROM records WHERE kind = $1 AND id = $2",
    )
    .bind(kind.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(row_to_record))
}

/// Apply a partial update. The acting user must be privileged or the
/// record's uploader.
///
/// # Errors
///
/// Returns `NotFound` for a missing record, `Forbidden` when the predicate
/// rejects the user, or a database error.
pub async fn update_record(pool: &PgPool, user: &SessionUser, patch: RecordPatch) -> Result<Record, RecordError> {
    let mut record = fetch_record(pool, patch.kind, &patch.id)
        .await?
        .ok_or_else(|| RecordError::NotFound(patch.id.clone()))?;

    if !authz::can_edit(user, &record.email) {
        return Err(RecordError::Forbidden(patch.id));
    }

    if let Some(title) = patch.title {
        record.title = title;
    }
    if let Some(description) = patch.description {
        record.description = description;
    }
    if let Some(status) = patch.status {
        record.status = Some(status);
    }
    if let Some(attachments) = patch.attachments {
        record.attachments = attachments;
    }
    if let Some(props) = patch.props {
        record.props = props;
    }
    record.updated_by = Some(user.email.clone());

    sqlx::query(
        "UPDATE records SET title = $3, description = $4, updated_by = $5, status = $6, attachments = $7, props = $8
         WHERE kind = $1 AND id = $2",
    )
    .bind(record.kind.as_str())
    .bind(&record.id)
    .bind(&record.title)
    .bind(&record.description)
    .bind(record.updated_by.as_deref())
    .bind(record.status.map(RecordStatus::as_str))
    .bind(encode_attachments(&record.attachments))
    .bind(&record.props)
    .execute(pool)
    .await?;

    Ok(record)
}

/// Delete a record. Same authorization rule as updates.
///
/// # Errors
///
/// Returns `NotFound`, `Forbidden`, or a database error.
pub async fn delete_record(pool: &PgPool, user: &SessionUser, kind: RecordKind, id: &str) -> Result<(), RecordError> {
    let record = fetch_record(pool, kind, id)
        .await?
        .ok_or_else(|| RecordError::NotFound(id.to_owned()))?;

    if !authz::can_edit(user, &record.email) {
        return Err(RecordError::Forbidden(id.to_owned()));
    }

    let result = sqlx::query("DELETE FROM records WHERE kind = $1 AND id = $2")
        .bind(kind.as_str())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RecordError::NotFound(id.to_owned()));
    }
    Ok(())
}

// =============================================================================
// ROW MAPPING
// =============================================================================

type RecordRow = (
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    i64,
    Option<String>,
    String,
    serde_json::Value,
);

fn row_to_record(row: RecordRow) -> Option<Record> {
    let (id, kind, title, description, email, updated_by, ts, status, attachments, props) = row;
    let Some(kind) = RecordKind::from_str(&kind) else {
        tracing::warn!(%id, %kind, "skipping record with unknown kind");
        return None;
    };

    Some(Record {
        id,
        kind,
        title,
        description,
        email,
        updated_by,
        timestamp: ts,
        status: status.as_deref().and_then(RecordStatus::from_str),
        attachments: AttachmentField::Raw(attachments).normalize(),
        props,
    })
}

fn encode_attachments(attachments: &[Attachment]) -> String {
    serde_json::to_string(attachments).unwrap_or_else(|_| String::from("[]"))
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
