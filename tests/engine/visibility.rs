//! The mandatory filter: publish state, publish date, blog scope.

use super::common::*;
use chrono::Duration;
use folio::{BlogId, EntryId};

#[test]
fn test_unpublished_entries_never_match() {
    let engine = engine();
    let mut draft = make_entry(20, "secret sample");
    draft.is_published = false;
    engine.add_or_update(draft).unwrap();
    engine.add_or_update(make_entry(1, "public sample")).unwrap();

    let results = search(&engine, "sample");
    assert_eq!(results.entry_ids(), vec![EntryId(1)]);
    assert_eq!(results.total, 1);
}

#[test]
fn test_future_entries_appear_once_due() {
    let engine = engine();
    engine.add_or_update(future_entry(20, "upcoming launch")).unwrap();

    assert_eq!(search(&engine, "launch").total, 0);
    let later = engine
        .search_as_of("launch", 10, 0, None, reference_time() + Duration::days(2))
        .unwrap();
    assert_eq!(later.entry_ids(), vec![EntryId(20)]);
}

#[test]
fn test_blog_scope_excludes_other_blogs() {
    let engine = engine();
    engine.add_or_update(make_entry_in_blog(1, 1, "shared topic")).unwrap();
    engine.add_or_update(make_entry_in_blog(20, 2, "shared topic")).unwrap();
    engine.add_or_update(make_entry(30, "shared topic")).unwrap();

    assert_eq!(search_in(&engine, "topic", Some(1)).entry_ids(), vec![EntryId(1)]);
    assert_eq!(search_in(&engine, "topic", Some(2)).entry_ids(), vec![EntryId(20)]);
    assert_eq!(search_in(&engine, "topic", None).total, 3);
}

#[test]
fn test_unscoped_record_only_in_unscoped_queries() {
    let engine = engine();
    let mut zero = make_entry(5, "orphan");
    zero.blog_id = Some(BlogId(0));
    engine.add_or_update(zero).unwrap();

    assert_eq!(search_in(&engine, "orphan", Some(1)).total, 0);
    assert_eq!(search_in(&engine, "orphan", None).total, 1);
    assert_eq!(search_in(&engine, "orphan", Some(0)).total, 1);
}

#[test]
fn test_related_skips_unpublished() {
    let engine = engine();
    engine.add_or_update(make_sample_post(1, None)).unwrap();
    let mut draft = make_sample_post(20, None);
    draft.is_published = false;
    engine.add_or_update(draft).unwrap();
    engine.add_or_update(make_sample_post(3, None)).unwrap();

    let results = related(&engine, 1, ALL, None);
    assert!(!results.entry_ids().contains(&EntryId(20)));
    assert_eq!(results.entry_ids(), vec![EntryId(3)]);
}

#[test]
fn test_related_skips_future_posts() {
    let engine = engine();
    engine.add_or_update(make_sample_post(1, None)).unwrap();
    let mut scheduled = make_sample_post(20, None);
    scheduled.publish_date = reference_time() + Duration::hours(3);
    engine.add_or_update(scheduled).unwrap();
    engine.add_or_update(make_sample_post(3, None)).unwrap();

    let results = related(&engine, 1, ALL, None);
    assert!(!results.entry_ids().contains(&EntryId(20)));
}

#[test]
fn test_related_skips_other_blogs() {
    let engine = engine();
    engine.add_or_update(make_sample_post(1, Some(1))).unwrap();
    engine.add_or_update(make_sample_post(20, Some(2))).unwrap();
    engine.add_or_update(make_sample_post(3, Some(1))).unwrap();

    let results = related(&engine, 1, ALL, Some(1));
    assert_eq!(results.entry_ids(), vec![EntryId(3)]);
}
