// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Running a weighted term query against one index snapshot.
//!
//! Matching is disjunctive: a document is a candidate when it holds at least
//! one query term in a ranked field. Candidates are filtered for visibility,
//! ranked, counted, and only then paged, so `total` never depends on the page.

use super::filter::{Page, VisibilityFilter};
use super::scoring::{compare_hits, posting_score, term_weight};
use crate::analyzer::Analyzer;
use crate::config::FieldWeights;
use crate::index::IndexState;
use crate::types::{EntryId, SearchResult, SearchResults};
use std::collections::HashMap;

/// One term of a query with its multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTerm {
    pub term: String,
    pub boost: f64,
}

/// A bag of analyzed terms, each with a boost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedQuery {
    terms: Vec<QueryTerm>,
}

impl WeightedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze free text into a query. A term repeated in the text counts
    /// once per repetition.
    pub fn parse(analyzer: &Analyzer, text: &str) -> Self {
        let mut query = WeightedQuery::new();
        for term in analyzer.analyze(text) {
            query.push(term, 1.0);
        }
        query
    }

    /// Add `boost` to `term`, inserting it if new.
    pub fn push(&mut self, term: impl Into<String>, boost: f64) {
        let term = term.into();
        match self.terms.iter_mut().find(|t| t.term == term) {
            Some(existing) => existing.boost += boost,
            None => self.terms.push(QueryTerm { term, boost }),
        }
    }

    pub fn terms(&self) -> &[QueryTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Score every visible match, rank, and cut out one page.
pub fn execute(
    state: &IndexState,
    query: &WeightedQuery,
    filter: &VisibilityFilter,
    weights: &FieldWeights,
    page: Page,
) -> SearchResults {
    if query.is_empty() || state.is_empty() {
        return SearchResults::empty();
    }

    let total_docs = state.len();
    let mut scores: HashMap<EntryId, f64> = HashMap::new();
    for QueryTerm { term, boost } in query.terms() {
        let Some(list) = state.postings(term) else {
            continue;
        };
        let weight = term_weight(*boost, list.len(), total_docs);
        for (&entry_id, posting) in list {
            let tf = posting_score(posting, weights);
            if tf > 0.0 {
                *scores.entry(entry_id).or_insert(0.0) += weight * tf;
            }
        }
    }

    let mut hits: Vec<(EntryId, f64)> = scores
        .into_iter()
        .filter(|(id, score)| {
            *score > 0.0 && state.document(*id).is_some_and(|doc| filter.admits(doc))
        })
        .collect();
    hits.sort_by(compare_hits);

    let total = hits.len();
    let results = page
        .apply(hits)
        .into_iter()
        .filter_map(|(id, score)| {
            state
                .document(id)
                .map(|doc| SearchResult::from_document(doc, score))
        })
        .collect();

    SearchResults { results, total }
}
