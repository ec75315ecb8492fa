//! Record routes — list window retrieval and CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::listing::ListRequest;
use crate::records::{Attachment, AttachmentField, Record, RecordKind, RecordStatus};
use crate::routes::auth::AuthUser;
use crate::services::record::{self, NewRecord, RecordPatch};
use crate::state::AppState;

pub(crate) fn record_error_to_status(err: record::RecordError) -> StatusCode {
    match err {
        record::RecordError::NotFound(_) => StatusCode::NOT_FOUND,
        record::RecordError::Forbidden(_) => StatusCode::FORBIDDEN,
        record::RecordError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn parse_kind(raw: &str) -> Result<RecordKind, StatusCode> {
    RecordKind::from_str(raw).ok_or(StatusCode::NOT_FOUND)
}

fn parse_status(raw: Option<&str>) -> Result<Option<RecordStatus>, StatusCode> {
    match raw {
        None => Ok(None),
        Some(s) => RecordStatus::from_str(s)
            .map(Some)
            .ok_or(StatusCode::BAD_REQUEST),
    }
}

fn normalize_attachments(field: Option<AttachmentField>) -> Option<Vec<Attachment>> {
    field.map(|f| f.normalize())
}

// =============================================================================
// LIST
// =============================================================================

/// `POST /api/:kind` — retrieve one page window of records.
///
/// Body: `{from, to, type: "between" | "range", ...filter}`.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(kind): Path<String>,
    Json(body): Json<ListRequest>,
) -> Result<Json<Vec<Record>>, StatusCode> {
    let kind = parse_kind(&kind)?;
    let rows = record::list_window(&state.pool, kind, &body)
        .await
        .map_err(record_error_to_status)?;
    Ok(Json(rows))
}

// =============================================================================
// CREATE / UPDATE
// =============================================================================

#[derive(Deserialize)]
pub struct CreateBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Uploader email; defaults to the acting user.
    pub email: Option<String>,
    pub status: Option<String>,
    pub attachments: Option<AttachmentField>,
    /// Kind-specific fields arrive flattened at the top level.
    #[serde(flatten)]
    pub props: serde_json::Map<String, serde_json::Value>,
}

/// `POST /api/create` — create a record for the acting user.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<Record>), StatusCode> {
    let kind = parse_kind(&body.kind)?;
    let status = parse_status(body.status.as_deref())?;

    let input = NewRecord {
        kind,
        id: body.id,
        title: body.title,
        description: body.description,
        email: body.email.unwrap_or(auth.user.email),
        status,
        attachments: normalize_attachments(body.attachments).unwrap_or_default(),
        props: serde_json::Value::Object(body.props),
    };

    let created = record::create_record(&state.pool, input)
        .await
        .map_err(record_error_to_status)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct UpdateBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub attachments: Option<AttachmentField>,
    /// Ignored: the acting user comes from the session, not the body.
    pub email: Option<String>,
    #[serde(flatten)]
    pub props: serde_json::Map<String, serde_json::Value>,
}

/// `PUT /api/update` — partial update, gated by the authorization predicate.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Record>, StatusCode> {
    let kind = parse_kind(&body.kind)?;
    let status = parse_status(body.status.as_deref())?;

    let patch = RecordPatch {
        kind,
        id: body.id,
        title: body.title,
        description: body.description,
        status,
        attachments: normalize_attachments(body.attachments),
        props: if body.props.is_empty() { None } else { Some(serde_json::Value::Object(body.props)) },
    };

    let updated = record::update_record(&state.pool, &auth.user, patch)
        .await
        .map_err(record_error_to_status)?;
    Ok(Json(updated))
}

// =============================================================================
// DELETE
// =============================================================================

#[derive(Deserialize)]
pub struct DeleteBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    /// Ignored: enforcement uses the authenticated session.
    pub email: Option<String>,
}

/// `POST /api/delete` — delete by kind discriminator in the body.
pub async fn delete_by_body(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<DeleteBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let kind = parse_kind(&body.kind)?;
    record::delete_record(&state.pool, &auth.user, kind, &body.id)
        .await
        .map_err(record_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Deserialize)]
pub struct DeleteByKindBody {
    pub id: String,
    pub email: Option<String>,
}

/// `DELETE /api/delete/:kind` — delete by kind path segment.
pub async fn delete_by_kind(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
    Json(body): Json<DeleteByKindBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let kind = parse_kind(&kind)?;
    record::delete_record(&state.pool, &auth.user, kind, &body.id)
        .await
        .map_err(record_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
