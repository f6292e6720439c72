//! Record Store Contract Tests
//!
//! Both backends must satisfy:
//! - create then get returns the same fields and a strictly larger id
//! - delete then get is NotFound, and delete is not idempotent
//! - update with one field keeps the other; an empty patch keeps both
//! - after n creates and m deletes, list holds n - m records with unique ids

use std::collections::HashSet;
use std::sync::Arc;

use recordstore::store::{
    JsonFileStore, NewRecord, Record, RecordPatch, RecordStore, SqliteStore, StoreError,
};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn json_store(temp: &TempDir) -> Arc<dyn RecordStore> {
    Arc::new(JsonFileStore::new(temp.path().join("data.json")))
}

fn sqlite_store(temp: &TempDir) -> Arc<dyn RecordStore> {
    Arc::new(
        SqliteStore::open(temp.path().join("database.db"), temp.path().join("export.json"))
            .expect("Failed to open sqlite store"),
    )
}

/// Run a check against a fresh store of each backend
fn for_each_backend(check: impl Fn(Arc<dyn RecordStore>)) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    check(json_store(&temp));

    let temp = TempDir::new().expect("Failed to create temp dir");
    check(sqlite_store(&temp));
}

// =============================================================================
// Identifier Assignment
// =============================================================================

#[test]
fn test_create_then_get_returns_same_fields_and_larger_id() {
    for_each_backend(|store| {
        let mut max_id = 0;
        for (name, value) in [("a", "1"), ("b", "2"), ("", ""), ("ä ö", "line\nbreak")] {
            let created = store.create(NewRecord::new(name, value)).unwrap();
            assert!(
                created.id > max_id,
                "{}: id {} not above {}",
                store.backend(),
                created.id,
                max_id
            );
            max_id = created.id;

            let fetched = store.get(created.id).unwrap();
            assert_eq!(fetched, Record::new(created.id, name, value));
        }
    });
}

#[test]
fn test_ids_never_reused_after_delete() {
    for_each_backend(|store| {
        let a = store.create(NewRecord::new("a", "1")).unwrap();
        let b = store.create(NewRecord::new("b", "2")).unwrap();
        store.delete(b.id).unwrap();
        store.delete(a.id).unwrap();

        let c = store.create(NewRecord::new("c", "3")).unwrap();
        assert!(c.id > b.id, "{}: reused id {}", store.backend(), c.id);
    });
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_then_get_is_not_found() {
    for_each_backend(|store| {
        let a = store.create(NewRecord::new("a", "1")).unwrap();

        assert_eq!(store.delete(a.id).unwrap(), a);
        assert_eq!(store.get(a.id), Err(StoreError::NotFound(a.id)));
        assert_eq!(store.delete(a.id), Err(StoreError::NotFound(a.id)));
    });
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_partial_update_keeps_other_field() {
    for_each_backend(|store| {
        let a = store.create(NewRecord::new("a", "1")).unwrap();

        let renamed = store.update(a.id, RecordPatch::name("X")).unwrap();
        assert_eq!(renamed, Record::new(a.id, "X", "1"));

        let unchanged = store.update(a.id, RecordPatch::default()).unwrap();
        assert_eq!(unchanged, Record::new(a.id, "X", "1"));
        assert_eq!(store.get(a.id).unwrap(), unchanged);
    });
}

#[test]
fn test_update_unknown_id_changes_nothing() {
    for_each_backend(|store| {
        let a = store.create(NewRecord::new("a", "1")).unwrap();

        assert_eq!(
            store.update(a.id + 100, RecordPatch::value("9")),
            Err(StoreError::NotFound(a.id + 100))
        );
        assert_eq!(store.list().unwrap(), vec![a.clone()]);
    });
}

// =============================================================================
// Create Validation
// =============================================================================

#[test]
fn test_create_missing_field_fails_without_persisting() {
    for_each_backend(|store| {
        let result = store.create(NewRecord {
            name: None,
            value: Some("1".to_string()),
        });
        assert_eq!(result, Err(StoreError::Validation("name".to_string())));
        assert!(store.list().unwrap().is_empty());

        // The failed create did not consume an id
        let a = store.create(NewRecord::new("a", "1")).unwrap();
        assert_eq!(a.id, 1);
    });
}

#[test]
fn test_create_accepts_empty_strings() {
    for_each_backend(|store| {
        let record = store.create(NewRecord::new("", "")).unwrap();
        assert_eq!(record, Record::new(1, "", ""));
        assert_eq!(store.get(1).unwrap(), record);
    });
}

// =============================================================================
// List
// =============================================================================

#[test]
fn test_list_after_creates_and_deletes() {
    for_each_backend(|store| {
        let n = 10;
        let mut ids = Vec::new();
        for i in 0..n {
            ids.push(store.create(NewRecord::new(format!("n{}", i), i.to_string())).unwrap().id);
        }

        let deleted: Vec<i64> = ids.iter().copied().step_by(3).collect();
        for id in &deleted {
            store.delete(*id).unwrap();
        }

        let records = store.list().unwrap();
        assert_eq!(records.len(), n - deleted.len());

        let unique: HashSet<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(unique.len(), records.len());

        // Insertion order
        let listed: Vec<i64> = records.iter().map(|r| r.id).collect();
        let expected: Vec<i64> = ids.into_iter().filter(|id| !deleted.contains(id)).collect();
        assert_eq!(listed, expected);
    });
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_creates_get_distinct_ids() {
    for_each_backend(|store| {
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..5)
                        .map(|i| {
                            store
                                .create(NewRecord::new(format!("t{}", t), i.to_string()))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let unique: HashSet<i64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 40, "{}: lost or duplicated ids", store.backend());
        assert_eq!(store.list().unwrap().len(), 40);
    });
}
