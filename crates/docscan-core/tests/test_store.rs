use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use docscan_core::store::{
    Backend, BackendConfig, JsonMetadataStore, LocalObjectStore, MemoryMetadataStore,
    MemoryObjectStore, MetadataStore, NewDocument, ObjectStore,
};

fn document(owner: &str, name: &str, day: u32) -> NewDocument {
    NewDocument {
        owner_id: owner.to_string(),
        original_file_name: name.to_string(),
        original_file_url: format!("memory://{name}"),
        processed_file_url: format!("memory://processed-{name}"),
        file_type: "image/png".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_memory_put_reports_progress_and_round_trips() {
    let store = MemoryObjectStore::new();
    let bytes = vec![7u8; 200_000];
    let mut seen = Vec::new();
    let object = store
        .put("images/u1/a.png", &bytes, "image/png", &mut |done, total| {
            seen.push((done, total))
        })
        .unwrap();

    assert_eq!(object.size, 200_000);
    assert_eq!(seen.first(), Some(&(0, 200_000)));
    assert_eq!(seen.last(), Some(&(200_000, 200_000)));
    assert!(seen.windows(2).all(|w| w[0].0 <= w[1].0));

    let url = store.public_url(&object).unwrap();
    assert_eq!(url, "memory://images/u1/a.png");
    assert_eq!(store.fetch(&url).unwrap(), bytes);
    assert!(store.fetch("file:///etc/hosts").is_err());
}

#[test]
fn test_memory_metadata_lists_owner_newest_first() {
    let store = MemoryMetadataStore::new();
    store.insert(document("u1", "old.png", 1)).unwrap();
    store.insert(document("u2", "theirs.png", 5)).unwrap();
    store.insert(document("u1", "new.png", 9)).unwrap();
    store.insert(document("u1", "mid.png", 4)).unwrap();

    let names: Vec<String> = store
        .list_by_owner("u1")
        .unwrap()
        .into_iter()
        .map(|r| r.original_file_name)
        .collect();
    assert_eq!(names, vec!["new.png", "mid.png", "old.png"]);
    assert!(store.list_by_owner("nobody").unwrap().is_empty());
}

#[test]
fn test_memory_ids_are_unique() {
    let store = MemoryMetadataStore::new();
    let a = store.insert(document("u1", "a.png", 1)).unwrap();
    let b = store.insert(document("u1", "b.png", 2)).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_local_object_store_writes_under_root() {
    let dir = tempdir().unwrap();
    let store = LocalObjectStore::new(dir.path().join("objects")).unwrap();
    let object = store
        .put("images/u1/1_original_a.png", b"abc", "image/png", &mut |_, _| {})
        .unwrap();

    let url = store.public_url(&object).unwrap();
    assert!(url.starts_with("file://"));
    assert!(store.root().join("images/u1/1_original_a.png").is_file());
    assert_eq!(store.fetch(&url).unwrap(), b"abc");
}

#[test]
fn test_local_object_store_rejects_escaping_keys() {
    let dir = tempdir().unwrap();
    let store = LocalObjectStore::new(dir.path()).unwrap();
    for key in ["../outside.png", "/abs/path.png", "images/../../x", ""] {
        let result = store.put(key, b"x", "image/png", &mut |_, _| {});
        assert!(result.is_err(), "key {key:?} was accepted");
    }
}

#[test]
fn test_local_fetch_refuses_paths_outside_root() {
    let dir = tempdir().unwrap();
    let store = LocalObjectStore::new(dir.path().join("objects")).unwrap();
    let outside = dir.path().join("secret.txt");
    std::fs::write(&outside, b"nope").unwrap();
    let url = format!("file://{}", outside.display());
    assert!(store.fetch(&url).is_err());

    for relative in ["../secret.txt", "./../secret.txt", "images/../../secret.txt"] {
        let url = format!("file://{}/{relative}", store.root().display());
        assert!(store.fetch(&url).is_err(), "{relative} escaped the root");
    }
}

#[test]
fn test_json_metadata_persists_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("documents.json");

    let store = JsonMetadataStore::new(&path).unwrap();
    store.insert(document("u1", "first.png", 2)).unwrap();
    store.insert(document("u1", "second.png", 3)).unwrap();
    drop(store);

    let reopened = JsonMetadataStore::new(&path).unwrap();
    let records = reopened.list_by_owner("u1").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].original_file_name, "second.png");
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_json_metadata_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let store = JsonMetadataStore::new(dir.path().join("documents.json")).unwrap();
    assert!(store.list_by_owner("u1").unwrap().is_empty());
}

#[test]
fn test_backend_from_local_config() {
    let dir = tempdir().unwrap();
    let config = BackendConfig::Local {
        root: dir.path().to_path_buf(),
    };
    let backend = Backend::from_config(&config).unwrap();
    assert_eq!(backend.objects.name(), "local");
    assert_eq!(backend.metadata.name(), "json-file");

    backend.metadata.insert(document("u1", "a.png", 1)).unwrap();
    assert!(dir.path().join("documents.json").is_file());
}

#[test]
fn test_backend_from_memory_config() {
    let backend = Backend::from_config(&BackendConfig::Memory).unwrap();
    assert_eq!(backend.objects.name(), "memory");
    assert_eq!(backend.metadata.name(), "memory");
}
