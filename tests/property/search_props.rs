//! Search and related-content invariants over random corpora.

use super::common::{engine, reference_time};
use chrono::Duration;
use folio::{BlogId, EntryId, SearchDocument, SearchEngine};
use proptest::prelude::*;
use std::collections::HashMap;

const VOCAB: [&str; 6] = ["rust", "kernel", "garden", "violin", "harbor", "quartz"];

#[derive(Debug, Clone)]
struct EntryShape {
    blog: i64,
    published: bool,
    offset_hours: i64,
    words: Vec<usize>,
}

fn shape_strategy() -> impl Strategy<Value = EntryShape> {
    (
        0i64..3,
        prop::bool::weighted(0.8),
        -48i64..48,
        prop::collection::vec(0usize..VOCAB.len(), 1..8),
    )
        .prop_map(|(blog, published, offset_hours, words)| EntryShape {
            blog,
            published,
            offset_hours,
            words,
        })
}

fn to_document(id: i64, shape: &EntryShape) -> SearchDocument {
    let body: Vec<&str> = shape.words.iter().map(|&w| VOCAB[w]).collect();
    SearchDocument {
        entry_id: EntryId(id),
        blog_id: Some(BlogId(shape.blog)),
        title: String::new(),
        body: body.join(" "),
        tags: String::new(),
        blog_name: format!("blog-{}", shape.blog),
        entry_name: format!("entry-{}", id),
        is_published: shape.published,
        publish_date: reference_time() + Duration::hours(shape.offset_hours),
    }
}

fn load(shapes: &[EntryShape]) -> (SearchEngine, HashMap<EntryId, SearchDocument>) {
    let engine = engine();
    let docs: Vec<SearchDocument> = shapes
        .iter()
        .enumerate()
        .map(|(i, s)| to_document(i as i64 + 1, s))
        .collect();
    engine.add_or_update_many(docs.clone()).unwrap();
    (engine, docs.into_iter().map(|d| (d.entry_id, d)).collect())
}

fn visible(doc: &SearchDocument, scope: Option<i64>) -> bool {
    doc.is_published
        && doc.publish_date <= reference_time()
        && scope.map_or(true, |b| doc.blog_id == Some(BlogId(b)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every hit is visible, contains a query word, and every visible
    /// document containing a query word is counted.
    #[test]
    fn prop_filter_sound_and_complete(
        shapes in prop::collection::vec(shape_strategy(), 1..25),
        word in 0usize..VOCAB.len(),
        scope in prop::option::of(1i64..3),
    ) {
        let (engine, docs) = load(&shapes);
        let results = engine
            .search_as_of(VOCAB[word], 1000, 0, scope.map(BlogId), reference_time())
            .unwrap();

        for hit in &results.results {
            let doc = &docs[&hit.entry_id];
            prop_assert!(visible(doc, scope));
            prop_assert!(doc.body.split(' ').any(|w| w == VOCAB[word]));
        }
        let expected = docs
            .values()
            .filter(|d| visible(d, scope) && d.body.split(' ').any(|w| w == VOCAB[word]))
            .count();
        prop_assert_eq!(results.total, expected);
        prop_assert_eq!(results.len(), expected);
    }

    /// Results are sorted by score descending, ties by entry id ascending.
    #[test]
    fn prop_ranking_order(
        shapes in prop::collection::vec(shape_strategy(), 1..25),
        words in prop::collection::vec(0usize..VOCAB.len(), 1..4),
    ) {
        let (engine, _) = load(&shapes);
        let query: Vec<&str> = words.iter().map(|&w| VOCAB[w]).collect();
        let results = engine
            .search_as_of(&query.join(" "), 1000, 0, None, reference_time())
            .unwrap();
        for pair in results.results.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.score > b.score || (a.score == b.score && a.entry_id < b.entry_id),
                "{:?} before {:?}", a, b
            );
        }
    }

    /// Concatenated pages equal the unpaged ranking, and every page reports
    /// the same total.
    #[test]
    fn prop_pages_partition_ranking(
        shapes in prop::collection::vec(shape_strategy(), 1..30),
        page_size in 1usize..7,
    ) {
        let (engine, _) = load(&shapes);
        let full = engine
            .search_as_of("rust kernel garden", 1000, 0, None, reference_time())
            .unwrap();
        let mut paged = Vec::new();
        let mut offset = 0;
        loop {
            let page = engine
                .search_as_of("rust kernel garden", page_size, offset, None, reference_time())
                .unwrap();
            prop_assert_eq!(page.total, full.total);
            if page.is_empty() {
                break;
            }
            paged.extend(page.entry_ids());
            offset += page_size;
        }
        prop_assert_eq!(paged, full.entry_ids());
    }

    /// Related content never contains its source and respects the filter.
    #[test]
    fn prop_related_excludes_source(
        shapes in prop::collection::vec(shape_strategy(), 1..25),
        source in 1i64..25,
        scope in prop::option::of(1i64..3),
    ) {
        let (engine, docs) = load(&shapes);
        let results = engine
            .related_to_as_of(EntryId(source), 1000, 0, scope.map(BlogId), reference_time())
            .unwrap();
        for hit in &results.results {
            prop_assert_ne!(hit.entry_id, EntryId(source));
            prop_assert!(visible(&docs[&hit.entry_id], scope));
        }
    }

    /// A minimum document frequency above the corpus size empties related
    /// content for every source.
    #[test]
    fn prop_min_df_above_corpus_is_empty(shapes in prop::collection::vec(shape_strategy(), 1..15)) {
        let params = folio::TuningParameters::default()
            .with_minimum_document_frequency(shapes.len() + 1);
        let engine = super::common::engine_with(params);
        let docs: Vec<SearchDocument> = shapes
            .iter()
            .enumerate()
            .map(|(i, s)| to_document(i as i64 + 1, s))
            .collect();
        engine.add_or_update_many(docs).unwrap();
        for id in 1..=shapes.len() as i64 {
            let results = engine
                .related_to_as_of(EntryId(id), 100, 0, None, reference_time())
                .unwrap();
            prop_assert!(results.is_empty());
        }
    }
}
