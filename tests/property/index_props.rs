//! Index bookkeeping against a model of the live document set.

use super::common::{engine, make_entry_in_blog};
use folio::{BlogId, EntryId, SearchDocument};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Upsert { id: i64, blog: i64, word: usize },
    Remove { id: i64 },
}

const WORDS: [&str; 4] = ["kernel", "garden", "violin", "harbor"];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1i64..12, 0i64..4, 0usize..WORDS.len())
            .prop_map(|(id, blog, word)| Op::Upsert { id, blog, word }),
        1 => (1i64..12).prop_map(|id| Op::Remove { id }),
    ]
}

fn document(id: i64, blog: i64, word: usize) -> SearchDocument {
    make_entry_in_blog(id, blog, WORDS[word])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Counts, membership and document frequency match the model after any
    /// sequence of upserts and removes.
    #[test]
    fn prop_bookkeeping_matches_model(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let engine = engine();
        let mut model: HashMap<i64, (i64, usize)> = HashMap::new();

        for op in ops {
            match op {
                Op::Upsert { id, blog, word } => {
                    engine.add_or_update(document(id, blog, word)).unwrap();
                    model.insert(id, (blog, word));
                }
                Op::Remove { id } => {
                    let existed = engine.remove(EntryId(id)).unwrap();
                    prop_assert_eq!(existed, model.remove(&id).is_some());
                }
            }
        }

        prop_assert_eq!(engine.document_count(None).unwrap(), model.len());
        for blog in 1..4 {
            let expected = model.values().filter(|(b, _)| *b == blog).count();
            prop_assert_eq!(engine.document_count(Some(BlogId(blog))).unwrap(), expected);
        }
        for id in 1..12 {
            prop_assert_eq!(engine.contains(EntryId(id)).unwrap(), model.contains_key(&id));
        }
        let snapshot = engine.snapshot().unwrap();
        for (w, word) in WORDS.iter().enumerate() {
            let expected = model.values().filter(|(_, mw)| *mw == w).count();
            let term = folio::Analyzer::new(&Default::default())
                .analyze(word)
                .next()
                .unwrap();
            prop_assert_eq!(snapshot.document_frequency(&term), expected);
        }
    }

    /// However often an id is re-added, it matches at most once.
    #[test]
    fn prop_upsert_never_duplicates(
        id in 1i64..1000,
        words in prop::collection::vec(0usize..WORDS.len(), 1..10),
    ) {
        let engine = engine();
        for &w in &words {
            engine.add_or_update(document(id, 1, w)).unwrap();
        }
        let last = *words.last().unwrap();
        for (w, word) in WORDS.iter().enumerate() {
            let hits = super::common::search(&engine, word);
            let expected = usize::from(w == last);
            prop_assert_eq!(hits.total, expected, "word {}", word);
        }
        prop_assert_eq!(engine.document_count(None).unwrap(), 1);
    }

    /// A batch commit yields the same index as the equivalent single upserts.
    #[test]
    fn prop_batch_equals_sequential(ops in prop::collection::vec((1i64..8, 0i64..3, 0usize..WORDS.len()), 1..20)) {
        let sequential = engine();
        let batched = engine();
        let docs: Vec<SearchDocument> = ops.iter().map(|&(id, b, w)| document(id, b, w)).collect();
        for doc in docs.clone() {
            sequential.add_or_update(doc).unwrap();
        }
        batched.add_or_update_many(docs).unwrap();

        for word in WORDS {
            prop_assert_eq!(
                super::common::search(&sequential, word).entry_ids(),
                super::common::search(&batched, word).entry_ids()
            );
        }
        prop_assert_eq!(sequential.document_count(None).unwrap(), batched.document_count(None).unwrap());
    }
}
