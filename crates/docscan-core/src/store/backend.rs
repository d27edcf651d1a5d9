use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

use super::{
    JsonMetadataStore, LocalObjectStore, MemoryMetadataStore, MemoryObjectStore, MetadataStore,
    ObjectStore,
};

/// Which persistence backend to use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BackendConfig {
    /// Objects under `root/objects`, metadata in `root/documents.json`.
    Local { root: PathBuf },
    /// Process memory; nothing survives exit.
    Memory,
    #[cfg(feature = "supabase")]
    Supabase(super::SupabaseConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Local {
            root: PathBuf::from("docscan-data"),
        }
    }
}

impl fmt::Display for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { root } => write!(f, "Local ({})", root.display()),
            Self::Memory => write!(f, "Memory"),
            #[cfg(feature = "supabase")]
            Self::Supabase(c) => write!(f, "Supabase ({})", c.url),
        }
    }
}

/// An object store and metadata store pair.
#[derive(Clone)]
pub struct Backend {
    pub objects: Arc<dyn ObjectStore>,
    pub metadata: Arc<dyn MetadataStore>,
}

impl Backend {
    pub fn new(objects: Arc<dyn ObjectStore>, metadata: Arc<dyn MetadataStore>) -> Self {
        Self { objects, metadata }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryObjectStore::new()),
            Arc::new(MemoryMetadataStore::new()),
        )
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let backend = match config {
            BackendConfig::Local { root } => Self::new(
                Arc::new(LocalObjectStore::new(root.join("objects"))?),
                Arc::new(JsonMetadataStore::new(root.join("documents.json"))?),
            ),
            BackendConfig::Memory => Self::in_memory(),
            #[cfg(feature = "supabase")]
            BackendConfig::Supabase(c) => Self::new(
                Arc::new(super::SupabaseObjectStore::new(c.clone())?),
                Arc::new(super::SupabaseMetadataStore::new(c.clone())?),
            ),
        };
        info!(
            objects = backend.objects.name(),
            metadata = backend.metadata.name(),
            "Backend ready"
        );
        Ok(backend)
    }
}
