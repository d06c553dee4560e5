//! Adding, replacing and removing entries.

use super::common::*;
use folio::{BlogId, EntryId};

#[test]
fn test_added_entries_are_searchable() {
    let engine = engine();
    for doc in sample_and_another((None, None)) {
        engine.add_or_update(doc).unwrap();
    }
    let results = search(&engine, "sample");
    assert_eq!(results.total, 2);
    assert_eq!(results.len(), 2);
}

#[test]
fn test_result_carries_display_fields() {
    let engine = engine();
    let mut doc = make_entry(1, "This is a sample post");
    doc.title = "This is the title".into();
    doc.entry_name = "this-is-the-title".into();
    engine.add_or_update(doc).unwrap();

    let results = search(&engine, "sample");
    let hit = &results.results[0];
    assert_eq!(hit.entry_id, EntryId(1));
    assert_eq!(hit.title, "This is the title");
    assert_eq!(hit.blog_name, "MyTestBlog");
    assert_eq!(hit.entry_name, "this-is-the-title");
    assert!(hit.score > 0.0);
}

#[test]
fn test_same_entry_id_replaces_original() {
    let engine = engine();
    engine
        .add_or_update(make_entry(1, "This is a sample post"))
        .unwrap();
    engine
        .add_or_update(make_entry(1, "This is a new post"))
        .unwrap();

    assert_eq!(search(&engine, "sample").total, 0);
    let results = search(&engine, "post");
    assert_eq!(results.total, 1);
    assert_eq!(results.results[0].entry_id, EntryId(1));
    assert_eq!(engine.document_count(None).unwrap(), 1);
}

#[test]
fn test_removed_entry_is_gone() {
    let engine = engine();
    engine
        .add_or_update(make_entry(1, "This is a sample post"))
        .unwrap();
    assert!(engine.remove(EntryId(1)).unwrap());
    assert_eq!(search(&engine, "sample").total, 0);
    assert!(!engine.contains(EntryId(1)).unwrap());
}

#[test]
fn test_removing_unknown_entry_is_not_an_error() {
    let engine = engine();
    assert!(!engine.remove(EntryId(404)).unwrap());
}

#[test]
fn test_disjoint_terms_scenario() {
    let engine = engine();
    engine.add_or_update(make_entry(1, "sample")).unwrap();
    engine.add_or_update(make_entry(2, "another")).unwrap();
    assert_eq!(search(&engine, "sample").total, 1);
    engine.remove(EntryId(1)).unwrap();
    assert_eq!(search(&engine, "sample").total, 0);
    assert_eq!(search(&engine, "another").total, 1);
}

#[test]
fn test_total_indexed_count() {
    let engine = engine();
    for doc in sample_and_another((Some(1), Some(2))) {
        engine.add_or_update(doc).unwrap();
    }
    assert_eq!(engine.document_count(None).unwrap(), 2);
}

#[test]
fn test_count_by_blog() {
    let engine = engine();
    engine.add_or_update(make_entry_in_blog(1, 1, "a")).unwrap();
    engine.add_or_update(make_entry_in_blog(2, 2, "b")).unwrap();
    engine.add_or_update(make_entry_in_blog(3, 2, "c")).unwrap();

    assert_eq!(engine.document_count(Some(BlogId(1))).unwrap(), 1);
    assert_eq!(engine.document_count(Some(BlogId(2))).unwrap(), 2);
    assert_eq!(engine.document_count(Some(BlogId(3))).unwrap(), 0);
}

#[test]
fn test_counts_include_hidden_entries() {
    let engine = engine();
    let mut draft = make_entry_in_blog(1, 1, "draft");
    draft.is_published = false;
    engine.add_or_update(draft).unwrap();
    engine.add_or_update(future_entry(2, "scheduled")).unwrap();
    assert_eq!(engine.document_count(None).unwrap(), 2);
    assert_eq!(engine.document_count(Some(BlogId(1))).unwrap(), 1);
}

#[test]
fn test_batch_add_is_one_commit() {
    let engine = engine();
    let before = engine.snapshot().unwrap().generation();
    let docs = (1..=50).map(|i| make_entry(i, "batch entry")).collect();
    assert_eq!(engine.add_or_update_many(docs).unwrap(), 50);
    assert_eq!(engine.snapshot().unwrap().generation(), before + 1);
    assert_eq!(search(&engine, "batch").total, 50);
}

#[test]
fn test_moving_entry_between_blogs() {
    let engine = engine();
    engine.add_or_update(make_entry_in_blog(1, 1, "wander")).unwrap();
    engine.add_or_update(make_entry_in_blog(1, 2, "wander")).unwrap();
    assert_eq!(search_in(&engine, "wander", Some(1)).total, 0);
    assert_eq!(search_in(&engine, "wander", Some(2)).total, 1);
    assert_eq!(engine.document_count(Some(BlogId(1))).unwrap(), 0);
}
