//! Supabase backend: Storage REST API for objects, PostgREST for metadata.
//!
//! Requests carry the project's anon key as `apikey` and the user's access
//! token (or the anon key when none is configured) as the bearer token.

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, ScanError};

use super::{DocumentRecord, MetadataStore, NewDocument, ObjectRef, ObjectStore};

/// Connection settings for a Supabase project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    pub anon_key: String,
    /// Session token of the signed-in user. Obtained outside this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_bucket() -> String {
    "documents".to_string()
}

fn default_table() -> String {
    "documents".to_string()
}

impl SupabaseConfig {
    fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Whether `url` points into this project. Only those get credentials.
    fn owns_url(&self, url: &str) -> bool {
        url.strip_prefix(self.base_url())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    pub fn object_endpoint(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url(), self.bucket, key)
    }

    pub fn public_object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url(),
            self.bucket,
            key
        )
    }

    pub fn table_endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url(), self.table)
    }
}

fn build_client() -> Result<Client> {
    Client::builder()
        .build()
        .map_err(|e| ScanError::Http(format!("Failed to create HTTP client: {e}")))
}

fn authorize(config: &SupabaseConfig, request: RequestBuilder) -> RequestBuilder {
    request
        .header("apikey", &config.anon_key)
        .bearer_auth(config.bearer())
}

fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().map_err(|e| {
        if e.is_connect() {
            ScanError::Http(format!("Connection failed: {e}"))
        } else if e.is_timeout() {
            ScanError::Http("Request timed out".into())
        } else {
            ScanError::Http(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ScanError::Http(format!("{} {}", status.as_u16(), body)));
    }
    Ok(response)
}

/// Object store backed by a Supabase Storage bucket.
pub struct SupabaseObjectStore {
    config: SupabaseConfig,
    client: Client,
}

impl SupabaseObjectStore {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        Ok(Self {
            config,
            client: build_client()?,
        })
    }
}

impl ObjectStore for SupabaseObjectStore {
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        media_type: &str,
        on_progress: &mut dyn FnMut(u64, u64),
    ) -> Result<ObjectRef> {
        let total = bytes.len() as u64;
        on_progress(0, total);

        let request = self
            .client
            .post(self.config.object_endpoint(key))
            .header("content-type", media_type)
            .body(bytes.to_vec());
        send(authorize(&self.config, request)).map_err(|e| ScanError::Storage(e.to_string()))?;

        on_progress(total, total);
        info!(key, size = total, bucket = %self.config.bucket, "Uploaded object to Supabase");
        Ok(ObjectRef {
            key: key.to_string(),
            size: total,
        })
    }

    fn public_url(&self, object: &ObjectRef) -> Result<String> {
        Ok(self.config.public_object_url(&object.key))
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let request = self.client.get(url);
        let request = if self.config.owns_url(url) {
            authorize(&self.config, request)
        } else {
            debug!(url, "Fetching foreign URL without credentials");
            request
        };
        let response = send(request)?;
        let bytes = response
            .bytes()
            .map_err(|e| ScanError::Http(format!("Failed to read body: {e}")))?;
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "supabase-storage"
    }
}

/// Row shape of the `documents` table.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DocumentRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub user_id: String,
    #[serde(default)]
    pub original_file_name: Option<String>,
    #[serde(default)]
    pub original_file_url: Option<String>,
    #[serde(default)]
    pub processed_file_url: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<NewDocument> for DocumentRow {
    fn from(doc: NewDocument) -> Self {
        Self {
            id: None,
            user_id: doc.owner_id,
            original_file_name: Some(doc.original_file_name),
            original_file_url: Some(doc.original_file_url),
            processed_file_url: Some(doc.processed_file_url),
            file_type: Some(doc.file_type),
            created_at: Some(doc.created_at),
        }
    }
}

impl From<DocumentRow> for DocumentRecord {
    fn from(row: DocumentRow) -> Self {
        let id = match row.id {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Self {
            id,
            owner_id: row.user_id,
            original_file_name: row.original_file_name.unwrap_or_default(),
            original_file_url: row.original_file_url.unwrap_or_default(),
            processed_file_url: row.processed_file_url.unwrap_or_default(),
            file_type: row.file_type.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// Metadata store backed by a Supabase table through PostgREST.
pub struct SupabaseMetadataStore {
    config: SupabaseConfig,
    client: Client,
}

impl SupabaseMetadataStore {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        Ok(Self {
            config,
            client: build_client()?,
        })
    }
}

impl MetadataStore for SupabaseMetadataStore {
    fn insert(&self, document: NewDocument) -> Result<DocumentRecord> {
        let row = DocumentRow::from(document);
        let request = self
            .client
            .post(self.config.table_endpoint())
            .header("Prefer", "return=representation")
            .json(&vec![row]);
        let response =
            send(authorize(&self.config, request)).map_err(|e| ScanError::Metadata(e.to_string()))?;

        let mut rows: Vec<DocumentRow> = response
            .json()
            .map_err(|e| ScanError::Metadata(format!("Invalid insert response: {e}")))?;
        let row = rows
            .pop()
            .ok_or_else(|| ScanError::Metadata("Insert returned no rows".into()))?;
        let record = DocumentRecord::from(row);
        info!(id = %record.id, owner = %record.owner_id, "Inserted document row");
        Ok(record)
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<DocumentRecord>> {
        let request = self.client.get(self.config.table_endpoint()).query(&[
            ("select", "*".to_string()),
            ("user_id", format!("eq.{owner_id}")),
            ("order", "created_at.desc".to_string()),
        ]);
        let response =
            send(authorize(&self.config, request)).map_err(|e| ScanError::Metadata(e.to_string()))?;
        let rows: Vec<DocumentRow> = response
            .json()
            .map_err(|e| ScanError::Metadata(format!("Invalid list response: {e}")))?;
        debug!(owner = owner_id, count = rows.len(), "Fetched document rows");
        Ok(rows.into_iter().map(DocumentRecord::from).collect())
    }

    fn name(&self) -> &'static str {
        "supabase-postgrest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SupabaseConfig {
        SupabaseConfig {
            url: "https://demo.supabase.co/".into(),
            anon_key: "anon".into(),
            access_token: None,
            bucket: "scans".into(),
            table: "documents".into(),
        }
    }

    #[test]
    fn endpoints_trim_trailing_slash() {
        let c = config();
        assert_eq!(
            c.object_endpoint("images/u1/a.png"),
            "https://demo.supabase.co/storage/v1/object/scans/images/u1/a.png"
        );
        assert_eq!(
            c.public_object_url("images/u1/a.png"),
            "https://demo.supabase.co/storage/v1/object/public/scans/images/u1/a.png"
        );
        assert_eq!(c.table_endpoint(), "https://demo.supabase.co/rest/v1/documents");
    }

    #[test]
    fn credentials_only_go_to_project_urls() {
        let c = config();
        assert!(c.owns_url("https://demo.supabase.co/storage/v1/object/public/scans/a.png"));
        assert!(!c.owns_url("https://example.com/a.png"));
        assert!(!c.owns_url("https://demo.supabase.co.evil.com/a.png"));
        assert!(!c.owns_url("http://demo.supabase.co/a.png"));
    }

    #[test]
    fn bearer_falls_back_to_anon_key() {
        let mut c = config();
        assert_eq!(c.bearer(), "anon");
        c.access_token = Some("token".into());
        assert_eq!(c.bearer(), "token");
    }

    #[test]
    fn row_with_numeric_id_maps_to_record() {
        let row: DocumentRow = serde_json::from_str(
            r#"{"id": 42, "user_id": "u1", "original_file_name": "a.pdf",
                "original_file_url": "o", "processed_file_url": "p",
                "file_type": "application/pdf", "created_at": "2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        let record = DocumentRecord::from(row);
        assert_eq!(record.id, "42");
        assert_eq!(record.owner_id, "u1");
        assert!(record.created_at.is_some());
    }

    #[test]
    fn row_with_missing_urls_defaults_to_empty() {
        let row: DocumentRow = serde_json::from_str(r#"{"id": "x", "user_id": "u1"}"#).unwrap();
        let record = DocumentRecord::from(row);
        assert_eq!(record.original_file_url, "");
        assert_eq!(record.created_at, None);
    }
}
