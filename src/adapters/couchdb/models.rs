//! CouchDB wire models
//!
//! Request and response bodies for the few CouchDB endpoints the store uses,
//! plus the stored shape of the canonical state document.

use crate::domain::{MigrationRecord, MigrationState};
use serde::{Deserialize, Serialize};

/// `_id` of the canonical state document
///
/// Stores written by earlier deployments use the same key, so their state
/// stays readable.
pub const STATE_DOCUMENT_ID: &str = "1";

/// The canonical state document as stored in CouchDB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Document ID, always [`STATE_DOCUMENT_ID`] when written by this crate
    #[serde(rename = "_id")]
    pub id: String,

    /// Revision token; attached on update, absent on first insert
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    /// Identifier of the most recently executed migration
    #[serde(rename = "lastRun")]
    pub last_run: String,

    /// Applied migrations, in application order
    #[serde(default)]
    pub migrations: Vec<MigrationRecord>,
}

impl StoredDocument {
    /// Project a state into the stored shape under the canonical key
    ///
    /// Each record is rebuilt from its `title` and `timestamp` only.
    pub fn from_state(state: &MigrationState) -> Self {
        Self {
            id: STATE_DOCUMENT_ID.to_string(),
            rev: None,
            last_run: state.last_run.clone(),
            migrations: state
                .migrations
                .iter()
                .map(|m| MigrationRecord::new(m.title.clone(), m.timestamp.clone()))
                .collect(),
        }
    }

    /// Attach the revision token of the document being replaced
    pub fn with_rev(mut self, rev: Option<String>) -> Self {
        self.rev = rev;
        self
    }

    /// Drop the CouchDB metadata and return the domain state
    pub fn into_state(self) -> MigrationState {
        MigrationState {
            last_run: self.last_run,
            migrations: self.migrations,
        }
    }
}

/// Mango `_find` request body
#[derive(Debug, Clone, Serialize)]
pub struct FindRequest {
    /// Mango selector; `{}` matches every document
    pub selector: serde_json::Value,

    /// Maximum number of documents to return
    pub limit: u32,
}

impl FindRequest {
    /// Selector matching any single document
    pub fn any_one() -> Self {
        Self {
            selector: serde_json::json!({}),
            limit: 1,
        }
    }
}

/// Mango `_find` response body
#[derive(Debug, Clone, Deserialize)]
pub struct FindResponse<T> {
    /// Matching documents
    pub docs: Vec<T>,

    /// Index warning, e.g. when no index covers the selector
    #[serde(default)]
    pub warning: Option<String>,
}

/// Minimal view of a document used to read its revision
#[derive(Debug, Clone, Deserialize)]
pub struct RevisionProbe {
    #[serde(rename = "_rev")]
    pub rev: String,
}

/// Response to a document write
///
/// A write only counts when CouchDB reports `"ok": true`.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteResponse {
    #[serde(default)]
    pub ok: bool,
    pub rev: String,
}

/// CouchDB error body (`{"error": "...", "reason": "..."}`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CouchErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub reason: String,
}

impl CouchErrorBody {
    /// Render an error body, falling back to the raw text when it is not JSON
    pub fn describe(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<CouchErrorBody>(body) {
            Ok(parsed) if !parsed.error.is_empty() => {
                format!("{status}: {} ({})", parsed.error, parsed.reason)
            }
            _ if body.trim().is_empty() => status.to_string(),
            _ => format!("{status}: {}", body.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_insert_has_no_rev() {
        let state = MigrationState::new("2024-01-01")
            .with_migration(MigrationRecord::new("init", "2024-01-01T00:00:00Z"));

        let value = serde_json::to_value(StoredDocument::from_state(&state)).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "1",
                "lastRun": "2024-01-01",
                "migrations": [{"title": "init", "timestamp": "2024-01-01T00:00:00Z"}]
            })
        );
    }

    #[test]
    fn test_update_carries_rev() {
        let doc = StoredDocument::from_state(&MigrationState::new("B"))
            .with_rev(Some("1-967a00dff5e02add41819138abb3284d".to_string()));

        let value = serde_json::to_value(doc).unwrap();
        assert_eq!(value["_rev"], "1-967a00dff5e02add41819138abb3284d");
        assert_eq!(value["_id"], STATE_DOCUMENT_ID);
    }

    #[test]
    fn test_stored_document_into_state_drops_metadata() {
        let doc: StoredDocument = serde_json::from_value(json!({
            "_id": "1",
            "_rev": "3-abc",
            "lastRun": "A",
            "migrations": [{"title": "a", "timestamp": "t"}]
        }))
        .unwrap();

        let state = doc.into_state();
        assert_eq!(state.last_run, "A");
        assert_eq!(state.migrations, vec![MigrationRecord::new("a", "t")]);
    }

    #[test]
    fn test_find_request_matches_any_document() {
        let value = serde_json::to_value(FindRequest::any_one()).unwrap();
        assert_eq!(value, json!({"selector": {}, "limit": 1}));
    }

    #[test]
    fn test_find_response_without_warning() {
        let response: FindResponse<StoredDocument> =
            serde_json::from_value(json!({"docs": []})).unwrap();
        assert!(response.docs.is_empty());
        assert!(response.warning.is_none());
    }

    #[test]
    fn test_describe_error_body() {
        let status = reqwest::StatusCode::CONFLICT;
        let text = CouchErrorBody::describe(
            status,
            r#"{"error":"conflict","reason":"Document update conflict."}"#,
        );
        assert_eq!(text, "409 Conflict: conflict (Document update conflict.)");

        assert_eq!(
            CouchErrorBody::describe(reqwest::StatusCode::BAD_GATEWAY, "  "),
            "502 Bad Gateway"
        );
        assert_eq!(
            CouchErrorBody::describe(reqwest::StatusCode::BAD_GATEWAY, "upstream down"),
            "502 Bad Gateway: upstream down"
        );
    }
}
