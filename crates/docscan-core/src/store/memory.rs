use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::consts::UPLOAD_CHUNK_BYTES;
use crate::error::{Result, ScanError};

use super::{
    sort_newest_first, write_chunked, DocumentRecord, MetadataStore, NewDocument, ObjectRef,
    ObjectStore,
};

const MEMORY_URL_PREFIX: &str = "memory://";

#[derive(Clone, Debug)]
struct StoredObject {
    bytes: Vec<u8>,
    media_type: String,
}

/// Object store held in process memory.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn media_type(&self, key: &str) -> Option<String> {
        let objects = self.objects.lock().ok()?;
        objects.get(key).map(|o| o.media_type.clone())
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        media_type: &str,
        on_progress: &mut dyn FnMut(u64, u64),
    ) -> Result<ObjectRef> {
        let mut buffer = Vec::with_capacity(bytes.len());
        write_chunked(bytes, UPLOAD_CHUNK_BYTES, on_progress, |chunk| {
            buffer.extend_from_slice(chunk);
            Ok(())
        })?;

        let mut objects = self
            .objects
            .lock()
            .map_err(|_| ScanError::Storage("object store lock poisoned".into()))?;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes: buffer,
                media_type: media_type.to_string(),
            },
        );
        debug!(key, size = bytes.len(), "Stored object in memory");
        Ok(ObjectRef {
            key: key.to_string(),
            size: bytes.len() as u64,
        })
    }

    fn public_url(&self, object: &ObjectRef) -> Result<String> {
        let objects = self
            .objects
            .lock()
            .map_err(|_| ScanError::Storage("object store lock poisoned".into()))?;
        if !objects.contains_key(&object.key) {
            return Err(ScanError::Storage(format!("No object at key {}", object.key)));
        }
        Ok(format!("{MEMORY_URL_PREFIX}{}", object.key))
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let key = url
            .strip_prefix(MEMORY_URL_PREFIX)
            .ok_or_else(|| ScanError::Storage(format!("Not a memory URL: {url}")))?;
        let objects = self
            .objects
            .lock()
            .map_err(|_| ScanError::Storage("object store lock poisoned".into()))?;
        objects
            .get(key)
            .map(|o| o.bytes.clone())
            .ok_or_else(|| ScanError::Storage(format!("No object at key {key}")))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Metadata store held in process memory. Ids are UUID v4.
#[derive(Default)]
pub struct MemoryMetadataStore {
    records: Mutex<Vec<DocumentRecord>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record regardless of owner, in insertion order.
    pub fn all(&self) -> Vec<DocumentRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn insert(&self, document: NewDocument) -> Result<DocumentRecord> {
        let record = document.into_record(uuid::Uuid::new_v4().to_string());
        let mut records = self
            .records
            .lock()
            .map_err(|_| ScanError::Metadata("metadata store lock poisoned".into()))?;
        records.push(record.clone());
        debug!(id = %record.id, owner = %record.owner_id, "Inserted document record");
        Ok(record)
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<DocumentRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| ScanError::Metadata("metadata store lock poisoned".into()))?;
        let mut owned: Vec<DocumentRecord> = records
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
