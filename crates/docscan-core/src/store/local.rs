use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::consts::UPLOAD_CHUNK_BYTES;
use crate::error::{Result, ScanError};

use super::{
    sort_newest_first, write_chunked, DocumentRecord, MetadataStore, NewDocument, ObjectRef,
    ObjectStore,
};

const FILE_URL_PREFIX: &str = "file://";

/// Object store writing files under a root directory.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path under the root, refusing keys that escape it.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(ScanError::Storage(format!("Invalid object key: {key}")));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for LocalObjectStore {
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        media_type: &str,
        on_progress: &mut dyn FnMut(u64, u64),
    ) -> Result<ObjectRef> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&path)?);
        write_chunked(bytes, UPLOAD_CHUNK_BYTES, on_progress, |chunk| {
            writer.write_all(chunk)?;
            Ok(())
        })?;
        writer.flush()?;

        debug!(key, media_type, size = bytes.len(), path = %path.display(), "Wrote object");
        Ok(ObjectRef {
            key: key.to_string(),
            size: bytes.len() as u64,
        })
    }

    fn public_url(&self, object: &ObjectRef) -> Result<String> {
        let path = self.path_for(&object.key)?;
        if !path.is_file() {
            return Err(ScanError::Storage(format!(
                "Object {} missing at {}",
                object.key,
                path.display()
            )));
        }
        Ok(format!("{FILE_URL_PREFIX}{}", path.display()))
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let path = url
            .strip_prefix(FILE_URL_PREFIX)
            .ok_or_else(|| ScanError::Storage(format!("Not a file URL: {url}")))?;
        let path = Path::new(path);
        let normalized = path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::RootDir | Component::Prefix(_)));
        if !normalized || !path.starts_with(&self.root) {
            return Err(ScanError::Storage(format!(
                "{} is outside the store root",
                path.display()
            )));
        }
        Ok(fs::read(path)?)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Metadata store persisting all records as one JSON array.
pub struct JsonMetadataStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonMetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<DocumentRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write through a temp file and rename, so readers never see half a file.
    fn write_all(&self, records: &[DocumentRecord]) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(records)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl MetadataStore for JsonMetadataStore {
    fn insert(&self, document: NewDocument) -> Result<DocumentRecord> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ScanError::Metadata("metadata file lock poisoned".into()))?;
        let mut records = self.read_all()?;
        let record = document.into_record(uuid::Uuid::new_v4().to_string());
        records.push(record.clone());
        self.write_all(&records)?;
        info!(id = %record.id, owner = %record.owner_id, path = %self.path.display(), "Saved document record");
        Ok(record)
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<DocumentRecord>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ScanError::Metadata("metadata file lock poisoned".into()))?;
        let mut owned: Vec<DocumentRecord> = self
            .read_all()?
            .into_iter()
            .filter(|r| r.owner_id == owner_id)
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}
