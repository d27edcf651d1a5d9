mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use common::{png_file, sequencer_with, FailingMetadataStore};
use docscan_core::gallery::{load_gallery, GalleryEntry, GalleryState, MSG_GALLERY_EMPTY};
use docscan_core::identity::Identity;
use docscan_core::store::{
    DocumentRecord, MemoryMetadataStore, MemoryObjectStore, MetadataStore, NewDocument,
};
use docscan_core::upload::{NoOpReporter, UploadJob};

fn insert(store: &MemoryMetadataStore, owner: &str, name: &str, day: u32) {
    store
        .insert(NewDocument {
            owner_id: owner.into(),
            original_file_name: name.into(),
            original_file_url: format!("memory://{name}"),
            processed_file_url: format!("memory://p-{name}"),
            file_type: "image/png".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 8, 30, 0).unwrap(),
        })
        .unwrap();
}

#[test]
fn test_signed_out_gallery() {
    let store = MemoryMetadataStore::new();
    insert(&store, "u1", "a.png", 1);
    assert_eq!(load_gallery(&store, None).unwrap(), GalleryState::SignedOut);
}

#[test]
fn test_empty_gallery() {
    let store = MemoryMetadataStore::new();
    insert(&store, "someone-else", "a.png", 1);
    let state = load_gallery(&store, Some(&Identity::new("u1"))).unwrap();
    assert_eq!(state, GalleryState::Empty);
    assert!(state.entries().is_empty());
    assert_eq!(MSG_GALLERY_EMPTY, "No Documents Found");
}

#[test]
fn test_gallery_lists_only_owner_newest_first() {
    let store = MemoryMetadataStore::new();
    insert(&store, "u1", "jan-02.png", 2);
    insert(&store, "u2", "other.png", 9);
    insert(&store, "u1", "jan-07.png", 7);

    let state = load_gallery(&store, Some(&Identity::new("u1"))).unwrap();
    let titles: Vec<&str> = state.entries().iter().map(|e| e.title()).collect();
    assert_eq!(titles, vec!["jan-07.png", "jan-02.png"]);
    assert_eq!(state.entries()[0].display_date(), "2024-01-07");
}

#[test]
fn test_missing_date_is_shown_as_unknown() {
    let entry = GalleryEntry {
        record: DocumentRecord {
            id: "1".into(),
            owner_id: "u1".into(),
            original_file_name: "a.png".into(),
            original_file_url: String::new(),
            processed_file_url: String::new(),
            file_type: "image/png".into(),
            created_at: None,
        },
    };
    assert_eq!(entry.display_date(), "Unknown date");
}

#[test]
fn test_gallery_query_failure_is_an_error() {
    let store = FailingMetadataStore::default();
    let result = load_gallery(&store, Some(&Identity::new("u1")));
    assert!(result.is_err());
}

#[test]
fn test_saved_document_appears_in_gallery() {
    let metadata = Arc::new(MemoryMetadataStore::new());
    let sequencer = sequencer_with(Arc::new(MemoryObjectStore::new()), metadata.clone());
    let identity = Identity::new("u1");

    let mut job = UploadJob::new();
    sequencer.prepare(&mut job, png_file("receipt.png")).unwrap();
    let record = sequencer.save(&mut job, Some(&identity), &NoOpReporter).unwrap();

    let state = load_gallery(metadata.as_ref(), Some(&identity)).unwrap();
    assert_eq!(state.entries().len(), 1);
    assert_eq!(state.entries()[0].record, record);
}
