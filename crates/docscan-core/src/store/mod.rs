//! Persistence collaborators: binary objects and document metadata.
//!
//! Both are capability traits so the upload flow and gallery run unchanged
//! against the in-memory, local filesystem, or Supabase backends.

mod backend;
mod local;
mod memory;
#[cfg(feature = "supabase")]
mod supabase;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use backend::{Backend, BackendConfig};
pub use local::{JsonMetadataStore, LocalObjectStore};
pub use memory::{MemoryMetadataStore, MemoryObjectStore};
#[cfg(feature = "supabase")]
pub use supabase::{SupabaseConfig, SupabaseMetadataStore, SupabaseObjectStore};

/// Handle to an object once it has been fully written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    pub key: String,
    pub size: u64,
}

/// Stores binary objects under string keys.
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` under `key`. `on_progress` receives `(bytes_written, total)`.
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        media_type: &str,
        on_progress: &mut dyn FnMut(u64, u64),
    ) -> Result<ObjectRef>;

    /// Durable URL for a written object.
    fn public_url(&self, object: &ObjectRef) -> Result<String>;

    /// Read back an object by the URL returned from [`ObjectStore::public_url`].
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    fn name(&self) -> &'static str;
}

/// Metadata record for one uploaded document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub owner_id: String,
    pub original_file_name: String,
    pub original_file_url: String,
    pub processed_file_url: String,
    pub file_type: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A record before the store has assigned it an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub owner_id: String,
    pub original_file_name: String,
    pub original_file_url: String,
    pub processed_file_url: String,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

impl NewDocument {
    pub(crate) fn into_record(self, id: String) -> DocumentRecord {
        DocumentRecord {
            id,
            owner_id: self.owner_id,
            original_file_name: self.original_file_name,
            original_file_url: self.original_file_url,
            processed_file_url: self.processed_file_url,
            file_type: self.file_type,
            created_at: Some(self.created_at),
        }
    }
}

/// Stores and queries document metadata.
pub trait MetadataStore: Send + Sync {
    fn insert(&self, document: NewDocument) -> Result<DocumentRecord>;

    /// All records of `owner_id`, newest first.
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<DocumentRecord>>;

    fn name(&self) -> &'static str;
}

/// Sort newest first; records without a timestamp go last.
pub(crate) fn sort_newest_first(records: &mut [DocumentRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Report progress for `bytes` written in fixed-size chunks through `write`.
pub(crate) fn write_chunked(
    bytes: &[u8],
    chunk_size: usize,
    on_progress: &mut dyn FnMut(u64, u64),
    mut write: impl FnMut(&[u8]) -> Result<()>,
) -> Result<()> {
    let total = bytes.len() as u64;
    on_progress(0, total);
    let mut written = 0u64;
    for chunk in bytes.chunks(chunk_size.max(1)) {
        write(chunk)?;
        written += chunk.len() as u64;
        on_progress(written, total);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, ts: Option<i64>) -> DocumentRecord {
        DocumentRecord {
            id: id.into(),
            owner_id: "u1".into(),
            original_file_name: "a.png".into(),
            original_file_url: String::new(),
            processed_file_url: String::new(),
            file_type: "image/png".into(),
            created_at: ts.map(|s| Utc.timestamp_opt(s, 0).unwrap()),
        }
    }

    #[test]
    fn undated_records_sort_last() {
        let mut records = vec![record("old", Some(10)), record("none", None), record("new", Some(20))];
        sort_newest_first(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["new", "old", "none"]);
    }

    #[test]
    fn chunked_write_reports_every_chunk() {
        let mut seen = Vec::new();
        let mut out = Vec::new();
        write_chunked(&[1u8; 10], 4, &mut |done, total| seen.push((done, total)), |c| {
            out.extend_from_slice(c);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![(0, 10), (4, 10), (8, 10), (10, 10)]);
        assert_eq!(out.len(), 10);
    }
}
