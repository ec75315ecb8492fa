//! Record model shared by the server and the client layer.
//!
//! DESIGN
//! ======
//! All three portal kinds (innovations, events, projects) share one record
//! shape: common columns plus a free-form `props` object for kind-specific
//! fields. Attachment metadata arrives either as a JSON-encoded string or an
//! already-parsed list; `AttachmentField` models both and is normalized at
//! the data-access boundary so display logic only ever sees `Vec<Attachment>`.

use serde::{Deserialize, Serialize};

// =============================================================================
// RECORD KIND
// =============================================================================

/// Discriminator for the three portal record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Innovation,
    Event,
    Project,
}

impl RecordKind {
    /// Parse a wire discriminator. Accepts the legacy aliases the original
    /// portal clients send (`events`, `projects`, `sponsored_projects`).
    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "innovation" | "innovations" => Some(Self::Innovation),
            "event" | "events" => Some(Self::Event),
            "project" | "projects" | "sponsored_projects" => Some(Self::Project),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Innovation => "innovation",
            Self::Event => "event",
            Self::Project => "project",
        }
    }
}

// =============================================================================
// RECORD STATUS
// =============================================================================

/// Project lifecycle status. Other kinds leave it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Ongoing,
    Completed,
    Terminated,
}

impl RecordStatus {
    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "Ongoing" => Some(Self::Ongoing),
            "Completed" => Some(Self::Completed),
            "Terminated" => Some(Self::Terminated),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
            Self::Terminated => "Terminated",
        }
    }
}

// =============================================================================
// ATTACHMENTS
// =============================================================================

/// One attached link: a URL plus its display caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

/// Attachment metadata as stored or received: either a JSON-encoded string
/// (legacy rows) or an already-parsed list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttachmentField {
    Parsed(Vec<Attachment>),
    Raw(String),
}

impl AttachmentField {
    /// Normalize to a plain attachment list. Malformed JSON yields an empty
    /// list rather than an error: a bad attachment column must never fail
    /// the record's display.
    #[must_use]
    pub fn normalize(&self) -> Vec<Attachment> {
        match self {
            Self::Parsed(list) => list.clone(),
            Self::Raw(text) => parse_attachment_json(text),
        }
    }
}

impl Default for AttachmentField {
    fn default() -> Self {
        Self::Parsed(Vec::new())
    }
}

/// Lenient attachment decoding: entries missing `url` or `caption` degrade
/// to empty strings, non-object entries are skipped, anything that is not a
/// JSON array yields no entries.
fn parse_attachment_json(text: &str) -> Vec<Attachment> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            Some(Attachment {
                url: obj
                    .get("url")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
                caption: obj
                    .get("caption")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
            })
        })
        .collect()
}

// =============================================================================
// RECORD
// =============================================================================

/// A portal record as served to clients. Attachments are already normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub kind: RecordKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Uploader's email; owns edit rights together with privileged users.
    pub email: String,
    #[serde(default)]
    pub updated_by: Option<String>,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Kind-specific fields (funding agency, venue, ...), passed through.
    #[serde(default)]
    pub props: serde_json::Value,
}

/// Current time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(duration) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(duration.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
