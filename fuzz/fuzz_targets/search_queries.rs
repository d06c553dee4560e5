// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search query handling.
//!
//! Arbitrary query text and paging against a fixed corpus. The engine must
//! either reject the input as invalid or return a well-formed page: sorted,
//! no duplicates, never more than asked for, never more than the total.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{DateTime, Duration, Utc};
use folio::{BlogId, EntryId, Error, SearchDocument, SearchEngine, TuningParameters};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

#[derive(Debug, Arbitrary)]
struct Input {
    query: String,
    page_size: u16,
    offset: u16,
    blog: Option<u8>,
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

fn engine() -> SearchEngine {
    let engine = SearchEngine::in_memory(TuningParameters::default()).expect("engine");
    let bodies = [
        "Rust ownership and borrowing explained",
        "Écrire un compilateur en Rust",
        "Kernel scheduling, memory and interrupts",
        "日本語のテキスト検索",
        "Borrow checker errors and how to read them",
        "emoji 🦀 crab rave",
    ];
    let docs = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| SearchDocument {
            entry_id: EntryId(i as i64 + 1),
            blog_id: Some(BlogId(i as i64 % 3)),
            title: body.split(' ').take(2).collect::<Vec<_>>().join(" "),
            body: body.to_string(),
            tags: String::new(),
            blog_name: "Fuzz".into(),
            entry_name: format!("entry-{}", i),
            is_published: i != 4,
            publish_date: now() - Duration::hours(i as i64),
        })
        .collect();
    engine.add_or_update_many(docs).expect("index corpus");
    engine
}

fuzz_target!(|input: Input| {
    static ENGINE: std::sync::OnceLock<SearchEngine> = std::sync::OnceLock::new();
    let engine = ENGINE.get_or_init(engine);

    let page_size = input.page_size as usize;
    let offset = input.offset as usize;
    let blog = input.blog.map(|b| BlogId(b as i64));

    let results = match engine.search_as_of(&input.query, page_size, offset, blog, now()) {
        Ok(results) => results,
        Err(Error::InvalidQueryInput(_)) => return,
        Err(e) => panic!("unexpected error: {}", e),
    };

    assert!(results.len() <= page_size);
    assert!(results.len() <= results.total);
    let ids: HashSet<_> = results.entry_ids().into_iter().collect();
    assert_eq!(ids.len(), results.len(), "duplicate hits");
    for pair in results.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(!ids.contains(&EntryId(5)), "unpublished entry leaked");
});
