// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Related content ("more like this").
//!
//! The source document's own term vector becomes the query:
//!
//! 1. Take every term of the ranked fields, weighted by its frequency there
//! 2. Drop terms rarer in the source than `minimumTermFrequency`
//! 3. Drop terms found in fewer live documents than `minimumDocumentFrequency`
//! 4. Keep the `maximumQueryTerms` heaviest, ties broken by term order
//! 5. Run the result through the normal query path with the source excluded
//!
//! Every step works on the snapshot the caller took, so the term statistics
//! and the documents they score always agree.

use crate::config::TuningParameters;
use crate::index::{AnalyzedDocument, IndexState};
use crate::query::{execute, Page, VisibilityFilter, WeightedQuery};
use crate::types::{EntryId, SearchResults};
use std::cmp::Ordering;

/// A selected similarity term and its weight in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicTerm {
    pub term: String,
    pub frequency: u32,
}

/// Pick the terms that characterize `source` within `state`.
pub fn characteristic_terms(
    state: &IndexState,
    source: &AnalyzedDocument,
    params: &TuningParameters,
) -> Vec<CharacteristicTerm> {
    let mut candidates: Vec<CharacteristicTerm> = source
        .terms
        .iter()
        .filter_map(|(term, posting)| {
            let frequency = posting.searchable_total();
            if frequency == 0 || (frequency as usize) < params.minimum_term_frequency {
                return None;
            }
            if state.document_frequency(term) < params.minimum_document_frequency {
                return None;
            }
            Some(CharacteristicTerm {
                term: term.to_string(),
                frequency,
            })
        })
        .collect();

    candidates.sort_by(|a, b| match b.frequency.cmp(&a.frequency) {
        Ordering::Equal => a.term.cmp(&b.term),
        other => other,
    });
    candidates.truncate(params.maximum_query_terms);
    candidates
}

/// Turn selected terms into a query. With `boost_terms`, each term is boosted
/// by its frequency relative to the heaviest selected term.
pub fn build_query(terms: &[CharacteristicTerm], boost_terms: bool) -> WeightedQuery {
    let mut query = WeightedQuery::new();
    let max = terms.iter().map(|t| t.frequency).max().unwrap_or(1).max(1) as f64;
    for t in terms {
        let boost = if boost_terms {
            t.frequency as f64 / max
        } else {
            1.0
        };
        query.push(t.term.clone(), boost);
    }
    query
}

/// Documents similar to `entry_id`, never including it.
///
/// An unknown id, or a source whose every term is filtered out, yields an
/// empty result rather than an error.
pub fn related_to(
    state: &IndexState,
    params: &TuningParameters,
    entry_id: EntryId,
    filter: VisibilityFilter,
    page: Page,
) -> SearchResults {
    let Some(source) = state.analyzed(entry_id) else {
        return SearchResults::empty();
    };
    let terms = characteristic_terms(state, source, params);
    if terms.is_empty() {
        return SearchResults::empty();
    }
    let query = build_query(&terms, params.boost_terms);
    execute(
        state,
        &query,
        &filter.excluding(entry_id),
        &params.field_weights,
        page,
    )
}
