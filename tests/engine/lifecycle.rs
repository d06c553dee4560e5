//! Open, close, and failure behaviour of the facade.

use super::common::*;
use folio::{EntryId, Error, SearchEngine, TuningParameters};

#[test]
fn test_close_is_idempotent() {
    let engine = engine();
    assert!(engine.is_open());
    engine.close();
    engine.close();
    assert!(!engine.is_open());
}

#[test]
fn test_every_operation_fails_after_close() {
    let engine = engine();
    engine.add_or_update(make_entry(1, "text")).unwrap();
    engine.close();

    assert!(matches!(engine.add_or_update(make_entry(2, "x")), Err(Error::EngineClosed)));
    assert!(matches!(engine.add_or_update_many(vec![]), Err(Error::EngineClosed)));
    assert!(matches!(engine.remove(EntryId(1)), Err(Error::EngineClosed)));
    assert!(matches!(engine.clear(), Err(Error::EngineClosed)));
    assert!(matches!(engine.search("text", 10, 0, None), Err(Error::EngineClosed)));
    assert!(matches!(engine.related_to(EntryId(1), 10, 0, None), Err(Error::EngineClosed)));
    assert!(matches!(engine.document_count(None), Err(Error::EngineClosed)));
    assert!(matches!(engine.get(EntryId(1)), Err(Error::EngineClosed)));
    assert!(matches!(engine.contains(EntryId(1)), Err(Error::EngineClosed)));
    assert!(matches!(engine.snapshot(), Err(Error::EngineClosed)));
}

#[test]
fn test_failed_write_keeps_previous_version() {
    let storage = FailingStorage::new();
    let engine = SearchEngine::open(TuningParameters::default(), Box::new(storage.clone())).unwrap();
    engine.add_or_update(make_entry(1, "stable version")).unwrap();

    storage.fail_next();
    let err = engine.add_or_update(make_entry(1, "doomed rewrite")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));

    assert_eq!(search(&engine, "stable").total, 1);
    assert_eq!(search(&engine, "doomed").total, 0);

    storage.fail_next();
    assert!(engine.remove(EntryId(1)).is_err());
    assert!(engine.contains(EntryId(1)).unwrap());
}

#[test]
fn test_snapshot_outlives_writes() {
    let engine = engine();
    engine.add_or_update(make_entry(1, "before")).unwrap();
    let snapshot = engine.snapshot().unwrap();
    engine.remove(EntryId(1)).unwrap();

    assert!(snapshot.contains(EntryId(1)));
    assert!(!engine.contains(EntryId(1)).unwrap());
}
