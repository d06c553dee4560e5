//! File-backed engines survive a restart.

use super::common::*;
use folio::storage::SNAPSHOT_FILE;
use folio::{BlogId, EngineConfig, EntryId, Error, SearchEngine, TuningParameters};
use std::fs;

#[test]
fn test_reopen_restores_documents_and_postings() {
    let dir = tempfile::tempdir().unwrap();
    {
        let engine = SearchEngine::open_dir(dir.path(), EngineConfig::default()).unwrap();
        engine
            .add_or_update_many(vec![
                make_entry_in_blog(1, 1, "persistent sample"),
                make_entry_in_blog(2, 2, "persistent other"),
            ])
            .unwrap();
        engine.remove(EntryId(2)).unwrap();
        engine.add_or_update(make_entry_in_blog(3, 1, "persistent third")).unwrap();
    }

    let engine = SearchEngine::open_dir(dir.path(), EngineConfig::default()).unwrap();
    assert_eq!(engine.document_count(None).unwrap(), 2);
    assert_eq!(engine.document_count(Some(BlogId(1))).unwrap(), 2);
    assert_eq!(search(&engine, "persistent").total, 2);
    assert_eq!(search(&engine, "sample").entry_ids(), vec![EntryId(1)]);
    assert!(!engine.contains(EntryId(2)).unwrap());
}

#[test]
fn test_reopen_with_new_analyzer_reindexes() {
    let dir = tempfile::tempdir().unwrap();
    {
        let engine = SearchEngine::open_dir(dir.path(), TuningParameters::default()).unwrap();
        engine.add_or_update(make_entry(1, "running")).unwrap();
        assert_eq!(search(&engine, "run").total, 1);
    }

    let unstemmed = TuningParameters::default().with_stemmer(folio::StemmerLanguage::None);
    let engine = SearchEngine::open_dir(dir.path(), unstemmed).unwrap();
    assert_eq!(search(&engine, "run").total, 0);
    assert_eq!(search(&engine, "running").total, 1);
}

#[test]
fn test_corrupt_snapshot_refuses_to_open() {
    let dir = tempfile::tempdir().unwrap();
    {
        let engine = SearchEngine::open_dir(dir.path(), EngineConfig::default()).unwrap();
        engine.add_or_update(make_entry(1, "soon corrupted")).unwrap();
    }
    let path = dir.path().join(SNAPSHOT_FILE);
    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    let err = SearchEngine::open_dir(dir.path(), EngineConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Corrupt(_)));
}

#[test]
fn test_clear_persists() {
    let dir = tempfile::tempdir().unwrap();
    {
        let engine = SearchEngine::open_dir(dir.path(), EngineConfig::default()).unwrap();
        engine.add_or_update(make_entry(1, "ephemeral")).unwrap();
        engine.clear().unwrap();
    }
    let engine = SearchEngine::open_dir(dir.path(), EngineConfig::default()).unwrap();
    assert_eq!(engine.document_count(None).unwrap(), 0);
}
