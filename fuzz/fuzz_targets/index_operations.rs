// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for sequences of index mutations.
//!
//! Random upserts and removes are mirrored into a plain map. After every
//! step the engine's counts and membership must agree with the map.

#![no_main]

use arbitrary::Arbitrary;
use chrono::DateTime;
use folio::{BlogId, EntryId, SearchDocument, SearchEngine, TuningParameters};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

#[derive(Debug, Arbitrary)]
enum Op {
    Upsert { id: u8, blog: u8, body: String },
    Remove { id: u8 },
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let engine = SearchEngine::in_memory(TuningParameters::default()).expect("engine");
    let mut model: HashMap<u8, u8> = HashMap::new();

    for op in ops.into_iter().take(64) {
        match op {
            Op::Upsert { id, blog, body } => {
                let doc = SearchDocument {
                    entry_id: EntryId(id as i64),
                    blog_id: Some(BlogId(blog as i64 % 4)),
                    title: String::new(),
                    body,
                    tags: String::new(),
                    blog_name: String::new(),
                    entry_name: String::new(),
                    is_published: true,
                    publish_date: DateTime::from_timestamp(0, 0).unwrap_or_default(),
                };
                engine.add_or_update(doc).expect("upsert");
                model.insert(id, blog % 4);
            }
            Op::Remove { id } => {
                let existed = engine.remove(EntryId(id as i64)).expect("remove");
                assert_eq!(existed, model.remove(&id).is_some());
            }
            Op::Clear => {
                engine.clear().expect("clear");
                model.clear();
            }
        }
        assert_eq!(engine.document_count(None).expect("count"), model.len());
    }

    for blog in 1..4u8 {
        let expected = model.values().filter(|b| **b == blog).count();
        let actual = engine.document_count(Some(BlogId(blog as i64))).expect("count");
        assert_eq!(actual, expected);
    }
});
