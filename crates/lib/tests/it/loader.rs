//! Loading against the storage and codec collaborator traits.

use upkeep::{
    Document,
    codec::Codec,
    loader::{LoaderSettings, load},
    route,
    update::UpdateSettings,
};

use crate::helpers::{
    BrokenStorage, JsonCodec, MemoryStorage, int_at, integer_settings, text_at, version_route,
};

fn defaults() -> Document {
    let mut defaults = Document::new();
    defaults.set(&version_route(), 2i64).unwrap();
    defaults.set(&route!["name"], "default").unwrap();
    defaults
}

#[test]
fn test_load_existing_document_without_auto_update() {
    let mut stored = Document::new();
    stored.set(&version_route(), 1i64).unwrap();
    stored.set(&route!["name"], "custom").unwrap();
    let mut storage = MemoryStorage::with_contents(JsonCodec.emit(&stored).unwrap());

    let loaded = load(
        &mut storage,
        &JsonCodec,
        &defaults(),
        &LoaderSettings::new(),
        &integer_settings(),
    )
    .unwrap();

    // Untouched: still at version 1, nothing merged.
    assert_eq!(loaded, stored);
}

#[test]
fn test_load_with_auto_update_reconciles() {
    let mut stored = Document::new();
    stored.set(&version_route(), 1i64).unwrap();
    stored.set(&route!["name"], "custom").unwrap();
    stored.set(&route!["stale"], true).unwrap();
    let mut storage = MemoryStorage::with_contents(JsonCodec.emit(&stored).unwrap());

    let loaded = load(
        &mut storage,
        &JsonCodec,
        &defaults(),
        &LoaderSettings::new().with_auto_update(true),
        &integer_settings(),
    )
    .unwrap();

    assert_eq!(int_at(&loaded, &version_route()), 2);
    assert_eq!(text_at(&loaded, &route!["name"]), "custom");
    assert!(!loaded.contains(&route!["stale"]));

    // The reconciled document is not persisted behind the caller's back.
    let on_disk = JsonCodec.parse(storage.contents.as_deref().unwrap()).unwrap();
    assert_eq!(on_disk, stored);
}

#[test]
fn test_absent_document_is_created_from_defaults() {
    let mut storage = MemoryStorage::empty();

    let loaded = load(
        &mut storage,
        &JsonCodec,
        &defaults(),
        &LoaderSettings::new(),
        &integer_settings(),
    )
    .unwrap();

    assert_eq!(loaded, defaults());
    let written = JsonCodec.parse(storage.contents.as_deref().unwrap()).unwrap();
    assert_eq!(written, defaults());
}

#[test]
fn test_absent_document_without_creation() {
    let mut storage = MemoryStorage::empty();

    let loaded = load(
        &mut storage,
        &JsonCodec,
        &defaults(),
        &LoaderSettings::new().with_create_file_if_absent(false),
        &integer_settings(),
    )
    .unwrap();

    assert_eq!(loaded, defaults());
    assert!(storage.contents.is_none());
}

#[test]
fn test_malformed_bytes_surface_as_parse_error() {
    let mut storage = MemoryStorage::with_contents(b"not json at all".to_vec());

    let err = load(
        &mut storage,
        &JsonCodec,
        &defaults(),
        &LoaderSettings::new(),
        &UpdateSettings::unversioned(),
    )
    .unwrap_err();

    assert!(err.is_parse_error());
}

#[test]
fn test_storage_failure_surfaces_as_io_error() {
    let err = load(
        &mut BrokenStorage,
        &JsonCodec,
        &defaults(),
        &LoaderSettings::new(),
        &UpdateSettings::unversioned(),
    )
    .unwrap_err();

    assert!(err.is_io_error());
}
