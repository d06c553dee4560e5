// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Postings and per-document analysis.
//!
//! A posting records how often one term occurs in each field of one document.
//! Posting lists are keyed by entry id in a `BTreeMap`, so iteration order is
//! ascending entry id without a separate sort.
//!
//! # Invariants
//!
//! 1. **NON_EMPTY**: every stored posting has at least one non-zero frequency
//! 2. **DOC_FREQ_CORRECT**: a posting list's length is the term's document frequency
//! 3. **TERMS_MATCH_POSTINGS**: a document's term vector lists exactly the terms
//!    whose posting lists contain that document

use crate::analyzer::Analyzer;
use crate::types::{EntryId, Field, SearchDocument};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const FIELD_COUNT: usize = Field::ALL.len();

/// Per-field occurrence counts of one term in one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Posting {
    frequencies: [u32; FIELD_COUNT],
}

impl Posting {
    #[inline]
    pub fn frequency(&self, field: Field) -> u32 {
        self.frequencies[field as usize]
    }

    #[inline]
    fn bump(&mut self, field: Field) {
        self.frequencies[field as usize] += 1;
    }

    /// Occurrences across every indexed field.
    pub fn total(&self) -> u32 {
        self.frequencies.iter().sum()
    }

    /// Occurrences across the ranked fields only.
    pub fn searchable_total(&self) -> u32 {
        Field::SEARCHABLE.iter().map(|f| self.frequency(*f)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// All documents containing one term, in ascending entry-id order.
pub type PostingList = BTreeMap<EntryId, Posting>;

/// A document plus its term vector, ready to be merged into an index.
///
/// Produced outside the writer lock so that analysis cost never extends the
/// critical section.
#[derive(Debug, Clone)]
pub struct AnalyzedDocument {
    pub document: Arc<SearchDocument>,
    /// Distinct terms with their per-field counts, sorted by term.
    pub terms: Vec<(Arc<str>, Posting)>,
}

impl AnalyzedDocument {
    pub fn entry_id(&self) -> EntryId {
        self.document.entry_id
    }

    /// Counts for a single term, if the document contains it.
    pub fn posting(&self, term: &str) -> Option<&Posting> {
        self.terms
            .binary_search_by(|(t, _)| t.as_ref().cmp(term))
            .ok()
            .map(|i| &self.terms[i].1)
    }
}

/// Tokenize every field of a document into a term vector.
pub fn analyze_document(analyzer: &Analyzer, document: SearchDocument) -> AnalyzedDocument {
    let mut counts: HashMap<String, Posting> = HashMap::new();
    for field in Field::ALL {
        for term in analyzer.analyze(document.field_text(field)) {
            counts.entry(term).or_default().bump(field);
        }
    }

    let mut terms: Vec<(Arc<str>, Posting)> = counts
        .into_iter()
        .map(|(term, posting)| (Arc::from(term), posting))
        .collect();
    terms.sort_by(|a, b| a.0.cmp(&b.0));

    AnalyzedDocument {
        document: Arc::new(document),
        terms,
    }
}

/// Analyze a batch of documents, one task per document.
#[cfg(feature = "parallel")]
pub fn analyze_documents(analyzer: &Analyzer, documents: Vec<SearchDocument>) -> Vec<AnalyzedDocument> {
    documents
        .into_par_iter()
        .map(|doc| analyze_document(analyzer, doc))
        .collect()
}

/// Sequential version for builds without rayon.
#[cfg(not(feature = "parallel"))]
pub fn analyze_documents(analyzer: &Analyzer, documents: Vec<SearchDocument>) -> Vec<AnalyzedDocument> {
    documents
        .into_iter()
        .map(|doc| analyze_document(analyzer, doc))
        .collect()
}
