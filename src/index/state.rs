// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index itself, as an immutable-once-published value.
//!
//! Writers never mutate a published `IndexState`. They clone it (cheaply: every
//! posting list and document sits behind an `Arc`), apply their change to the
//! private copy with `Arc::make_mut` on just the touched posting lists, and then
//! publish the copy. Readers holding the old value keep seeing it unchanged.

use super::posting::{AnalyzedDocument, Posting, PostingList};
use crate::types::{BlogId, EntryId, SearchDocument};
use std::collections::HashMap;
use std::sync::Arc;

/// Point-in-time contents of the index.
#[derive(Debug, Clone, Default)]
pub struct IndexState {
    documents: HashMap<EntryId, Arc<AnalyzedDocument>>,
    postings: HashMap<Arc<str>, Arc<PostingList>>,
    blog_counts: HashMap<BlogId, usize>,
    generation: u64,
}

impl IndexState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from already-analyzed documents. Later duplicates win.
    pub fn from_documents(documents: Vec<AnalyzedDocument>) -> Self {
        let mut state = IndexState::new();
        for doc in documents {
            state.insert(doc);
        }
        state
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Number of commits applied since the store was opened.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Live documents in the whole index.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Live documents, optionally restricted to one blog.
    pub fn document_count(&self, scope: Option<BlogId>) -> usize {
        match scope {
            None => self.documents.len(),
            Some(blog) => self.blog_counts.get(&blog).copied().unwrap_or(0),
        }
    }

    pub fn contains(&self, entry_id: EntryId) -> bool {
        self.documents.contains_key(&entry_id)
    }

    pub fn document(&self, entry_id: EntryId) -> Option<&SearchDocument> {
        self.documents.get(&entry_id).map(|d| d.document.as_ref())
    }

    pub fn analyzed(&self, entry_id: EntryId) -> Option<&AnalyzedDocument> {
        self.documents.get(&entry_id).map(Arc::as_ref)
    }

    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term).map(Arc::as_ref)
    }

    /// Number of live documents containing `term` in any field.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, |list| list.len())
    }

    /// Distinct terms in the index.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn documents(&self) -> impl Iterator<Item = &SearchDocument> {
        self.documents.values().map(|d| d.document.as_ref())
    }

    /// Shared handles to every stored document, for persistence.
    pub fn shared_documents(&self) -> Vec<Arc<SearchDocument>> {
        let mut docs: Vec<Arc<SearchDocument>> = self
            .documents
            .values()
            .map(|d| Arc::clone(&d.document))
            .collect();
        docs.sort_by_key(|d| d.entry_id);
        docs
    }

    // =========================================================================
    // WRITES (private copies only)
    // =========================================================================

    /// Insert or replace a document. Returns the replaced version, if any.
    pub fn insert(&mut self, doc: AnalyzedDocument) -> Option<Arc<AnalyzedDocument>> {
        let entry_id = doc.entry_id();
        let previous = self.remove(entry_id);

        for (term, posting) in &doc.terms {
            let list = self.postings.entry(Arc::clone(term)).or_default();
            Arc::make_mut(list).insert(entry_id, *posting);
        }
        if let Some(blog) = doc.document.blog_scope() {
            *self.blog_counts.entry(blog).or_insert(0) += 1;
        }
        self.documents.insert(entry_id, Arc::new(doc));
        previous
    }

    /// Delete a document and all of its postings. Absent ids are a no-op.
    pub fn remove(&mut self, entry_id: EntryId) -> Option<Arc<AnalyzedDocument>> {
        let doc = self.documents.remove(&entry_id)?;

        for (term, _) in &doc.terms {
            let emptied = match self.postings.get_mut(term.as_ref()) {
                Some(list) => {
                    let list = Arc::make_mut(list);
                    list.remove(&entry_id);
                    list.is_empty()
                }
                None => false,
            };
            if emptied {
                self.postings.remove(term.as_ref());
            }
        }
        if let Some(blog) = doc.document.blog_scope() {
            if let Some(count) = self.blog_counts.get_mut(&blog) {
                *count -= 1;
                if *count == 0 {
                    self.blog_counts.remove(&blog);
                }
            }
        }
        Some(doc)
    }

    pub fn clear(&mut self) -> bool {
        let had_documents = !self.documents.is_empty();
        self.documents.clear();
        self.postings.clear();
        self.blog_counts.clear();
        had_documents
    }

    pub(crate) fn advance_generation(&mut self) {
        self.generation += 1;
    }

    /// Posting for one (term, document) pair.
    pub fn posting(&self, term: &str, entry_id: EntryId) -> Option<Posting> {
        self.postings(term)?.get(&entry_id).copied()
    }
}
