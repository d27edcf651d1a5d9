use tracing::{info, warn};

use crate::error::{Result, ScanError};
use crate::identity::Identity;
use crate::store::{DocumentRecord, MetadataStore};

pub const MSG_GALLERY_FAILED: &str = "Error loading your documents. Please try again.";
pub const MSG_GALLERY_EMPTY: &str = "No Documents Found";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// What the gallery shows for the current identity.
#[derive(Clone, Debug, PartialEq)]
pub enum GalleryState {
    SignedOut,
    Empty,
    Loaded(Vec<GalleryEntry>),
}

impl GalleryState {
    pub fn entries(&self) -> &[GalleryEntry] {
        match self {
            Self::Loaded(entries) => entries,
            _ => &[],
        }
    }
}

/// One gallery card.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryEntry {
    pub record: DocumentRecord,
}

impl GalleryEntry {
    pub fn title(&self) -> &str {
        &self.record.original_file_name
    }

    /// Creation date as `YYYY-MM-DD`, or "Unknown date".
    pub fn display_date(&self) -> String {
        self.record
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string())
    }
}

/// Query the documents of `identity`, newest first.
pub fn load_gallery(store: &dyn MetadataStore, identity: Option<&Identity>) -> Result<GalleryState> {
    let Some(identity) = identity else {
        return Ok(GalleryState::SignedOut);
    };

    let records = store.list_by_owner(&identity.user_id).map_err(|e| {
        warn!(error = %e, owner = %identity.user_id, "Gallery query failed");
        ScanError::Metadata(format!("{MSG_GALLERY_FAILED} ({e})"))
    })?;

    info!(owner = %identity.user_id, count = records.len(), "Gallery loaded");
    if records.is_empty() {
        return Ok(GalleryState::Empty);
    }
    Ok(GalleryState::Loaded(
        records.into_iter().map(|record| GalleryEntry { record }).collect(),
    ))
}
