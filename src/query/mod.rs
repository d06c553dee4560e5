// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Free-text search: analyze the query, score matches, filter, rank, page.
//!
//! ```text
//!   text ──▶ Analyzer ──▶ WeightedQuery ──▶ execute(snapshot, filter, page)
//!                                               │
//!                               postings ──▶ tf-idf ──▶ visible? ──▶ sort ──▶ page
//! ```

mod execute;
mod filter;
pub mod scoring;

pub use execute::{execute, QueryTerm, WeightedQuery};
pub use filter::{Page, VisibilityFilter};

use crate::analyzer::Analyzer;
use crate::config::FieldWeights;
use crate::index::IndexState;
use crate::types::SearchResults;

/// Run a free-text query. Text that analyzes to no terms matches nothing.
pub fn search(
    state: &IndexState,
    analyzer: &Analyzer,
    weights: &FieldWeights,
    text: &str,
    filter: &VisibilityFilter,
    page: Page,
) -> SearchResults {
    let query = WeightedQuery::parse(analyzer, text);
    execute(state, &query, filter, weights, page)
}
