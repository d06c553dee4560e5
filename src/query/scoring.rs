// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! A document's score for a weighted query is
//!
//! ```text
//! score(d) = Σ_t  boost(t) · idf(t)² · Σ_f  weight(f) · √tf(t, d, f)
//! idf(t)   = 1 + ln(N / (df(t) + 1))
//! ```
//!
//! where `N` is the number of live documents and `f` ranges over the ranked
//! fields (title, body, tags).
//!
//! # Key Invariants
//!
//! 1. **TF_MONOTONE**: with everything else fixed, more occurrences of a query
//!    term in a ranked field never lower the score
//! 2. **IDF_MONOTONE**: with everything else fixed, a rarer term contributes
//!    strictly more than a commoner one
//! 3. **POSITIVE_IDF**: `df ≤ N` always holds for live postings, so
//!    `idf ≥ 1 - ln 2 > 0`
//! 4. **DETERMINISTIC_ORDER**: ties in score break by ascending entry id

use crate::config::FieldWeights;
use crate::index::Posting;
use crate::types::{EntryId, Field};
use std::cmp::Ordering;

/// Inverse document frequency of a term found in `doc_freq` of `total_docs`.
#[inline]
pub fn idf(doc_freq: usize, total_docs: usize) -> f64 {
    1.0 + (total_docs as f64 / (doc_freq as f64 + 1.0)).ln()
}

/// Dampened term frequency.
#[inline]
pub fn tf_weight(freq: u32) -> f64 {
    (freq as f64).sqrt()
}

/// Field-weighted term frequency of one posting. Zero when the term occurs
/// only in unranked fields.
pub fn posting_score(posting: &Posting, weights: &FieldWeights) -> f64 {
    Field::SEARCHABLE
        .iter()
        .map(|&field| weights.weight(field) * tf_weight(posting.frequency(field)))
        .sum()
}

/// Per-term multiplier: `boost · idf²`.
#[inline]
pub fn term_weight(boost: f64, doc_freq: usize, total_docs: usize) -> f64 {
    let idf = idf(doc_freq, total_docs);
    boost * idf * idf
}

/// Ranking order: score descending, then entry id ascending.
#[inline]
pub fn compare_hits(a: &(EntryId, f64), b: &(EntryId, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}
