//! Data-fetch seam: the `RecordsApi` trait and its HTTP implementation.
//!
//! The trait keeps the UI flows testable without a network; `HttpApi` is the
//! production implementation over reqwest. No retries, no request
//! cancellation: failures surface once and are handled by the caller.

use async_trait::async_trait;
use serde::Serialize;

use crate::listing::ListRequest;
use crate::records::{Attachment, Record, RecordKind, RecordStatus};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
}

/// Body for `POST /api/create`: draft fields merged with the acting user's
/// identity and the kind discriminator.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePayload {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    pub attachments: Vec<Attachment>,
    #[serde(flatten)]
    pub props: serde_json::Map<String, serde_json::Value>,
}

/// Body for `PUT /api/update`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePayload {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub id: String,
    pub title: String,
    pub description: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    pub attachments: Vec<Attachment>,
    #[serde(flatten)]
    pub props: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
struct DeletePayload<'a> {
    id: &'a str,
    email: &'a str,
}

// =============================================================================
// TRAIT
// =============================================================================

/// Request/response calls against the portal backend.
#[async_trait]
pub trait RecordsApi: Send + Sync {
    async fn list(&self, kind: RecordKind, req: &ListRequest) -> Result<Vec<Record>, ApiError>;
    async fn create(&self, payload: &CreatePayload) -> Result<Record, ApiError>;
    async fn update(&self, payload: &UpdatePayload) -> Result<Record, ApiError>;
    async fn delete(&self, kind: RecordKind, id: &str, email: &str) -> Result<(), ApiError>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

/// `RecordsApi` over the portal's REST endpoints.
pub struct HttpApi {
    base: String,
    http: reqwest::Client,
}

impl HttpApi {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(base, reqwest::Client::new())
    }

    /// Use a pre-configured client (session cookie, proxies, ...).
    #[must_use]
    pub fn with_client(base: impl Into<String>, http: reqwest::Client) -> Self {
        Self { base: base.into(), http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base.trim_end_matches('/'))
    }
}

fn ok_status(resp: &reqwest::Response) -> Result<(), ApiError> {
    let status = resp.status();
    if status.is_success() { Ok(()) } else { Err(ApiError::Status(status.as_u16())) }
}

#[async_trait]
impl RecordsApi for HttpApi {
    async fn list(&self, kind: RecordKind, req: &ListRequest) -> Result<Vec<Record>, ApiError> {
        let resp = self
            .http
            .post(self.url(&format!("/api/{}", kind.as_str())))
            .json(req)
            .send()
            .await?;
        ok_status(&resp)?;
        Ok(resp.json().await?)
    }

    async fn create(&self, payload: &CreatePayload) -> Result<Record, ApiError> {
        let resp = self.http.post(self.url("/api/create")).json(payload).send().await?;
        ok_status(&resp)?;
        Ok(resp.json().await?)
    }

    async fn update(&self, payload: &UpdatePayload) -> Result<Record, ApiError> {
        let resp = self.http.put(self.url("/api/update")).json(payload).send().await?;
        ok_status(&resp)?;
        Ok(resp.json().await?)
    }

    async fn delete(&self, kind: RecordKind, id: &str, email: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/delete/{}", kind.as_str())))
            .json(&DeletePayload { id, email })
            .send()
            .await?;
        ok_status(&resp)
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
