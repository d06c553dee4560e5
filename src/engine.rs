// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The engine facade: one explicitly constructed value per index.
//!
//! `SearchEngine` owns the configuration, the analyzer and the index store
//! (and through it the storage handle). It is `Send + Sync`; share it with an
//! `Arc` rather than through a global.
//!
//! ```ignore
//! use folio::{SearchEngine, TuningParameters};
//!
//! let engine = SearchEngine::in_memory(TuningParameters::default())?;
//! engine.add_or_update(document)?;
//! let page = engine.search("rust", 10, 0, None)?;
//! let related = engine.related_to(page.results[0].entry_id, 5, 0, None)?;
//! engine.close();
//! ```
//!
//! # Write cost
//!
//! Every write is a full commit: the index state is copied, and the storage
//! backend rewrites the whole document set (for [`FileStorage`], one
//! compressed snapshot file). A single upsert therefore costs time
//! proportional to the corpus, not to the document. Bulk loads should go
//! through [`SearchEngine::add_or_update_many`], which pays that cost once
//! per batch.
//!
//! Every read validates its input first, then takes one snapshot and answers
//! entirely from it. After [`SearchEngine::close`] (or drop) every call fails
//! with [`Error::EngineClosed`].

use crate::analyzer::Analyzer;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::index::{IndexStore, Snapshot};
use crate::query::{self, Page, VisibilityFilter};
use crate::similarity;
use crate::storage::{FileStorage, IndexStorage, MemoryStorage};
use crate::types::{BlogId, EntryId, SearchDocument, SearchResults};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct SearchEngine {
    config: Arc<EngineConfig>,
    store: IndexStore,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish()
    }
}

impl SearchEngine {
    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Open an engine over any storage backend.
    pub fn open(config: impl Into<EngineConfig>, storage: Box<dyn IndexStorage>) -> Result<Self> {
        let config = config.into();
        config.validate()?;
        let analyzer = Arc::new(Analyzer::new(&config.tuning));
        let store = IndexStore::open(analyzer, storage)?;
        info!(
            min_doc_freq = config.tuning.minimum_document_frequency,
            max_query_terms = config.tuning.maximum_query_terms,
            "search engine ready"
        );
        Ok(SearchEngine {
            config: Arc::new(config),
            store,
        })
    }

    /// Engine with a fresh, private in-memory index.
    pub fn in_memory(config: impl Into<EngineConfig>) -> Result<Self> {
        Self::open(config, Box::new(MemoryStorage::new()))
    }

    /// Engine persisted in `dir`, created if missing.
    pub fn open_dir(dir: impl AsRef<Path>, config: impl Into<EngineConfig>) -> Result<Self> {
        let storage = FileStorage::open(dir)?;
        Self::open(config, Box::new(storage))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.store.is_open()
    }

    /// Release the storage handle. Idempotent.
    pub fn close(&self) {
        self.store.close();
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Insert a document, or atomically replace the one with the same entry id.
    ///
    /// The change is committed before this returns: a search issued afterwards
    /// sees the new version and never the old one. Each call persists the
    /// whole index; prefer [`Self::add_or_update_many`] for more than a few
    /// documents.
    #[instrument(skip_all, fields(entry_id = %document.entry_id))]
    pub fn add_or_update(&self, document: SearchDocument) -> Result<()> {
        self.store.upsert(document)
    }

    /// Insert or replace many documents as a single commit. Returns how many
    /// documents the batch held.
    ///
    /// The batch is copied and persisted once, however many documents it
    /// holds.
    #[instrument(skip_all, fields(count = documents.len()))]
    pub fn add_or_update_many(&self, documents: Vec<SearchDocument>) -> Result<usize> {
        self.store.upsert_many(documents)
    }

    /// Delete a document. Removing an unknown id succeeds and returns `false`.
    #[instrument(skip(self))]
    pub fn remove(&self, entry_id: EntryId) -> Result<bool> {
        self.store.remove(entry_id)
    }

    /// Delete every document.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<()> {
        let cleared = self.store.clear()?;
        debug!(cleared, "clear");
        Ok(())
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Read-consistent view of the whole index.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.store.snapshot()
    }

    /// Stored copy of one document, visible or not.
    pub fn get(&self, entry_id: EntryId) -> Result<Option<SearchDocument>> {
        Ok(self.store.snapshot()?.document(entry_id).cloned())
    }

    pub fn contains(&self, entry_id: EntryId) -> Result<bool> {
        Ok(self.store.snapshot()?.contains(entry_id))
    }

    /// Live documents, optionally restricted to one blog. Counts every stored
    /// document regardless of publish state.
    pub fn document_count(&self, blog: Option<BlogId>) -> Result<usize> {
        self.store.document_count(scope(blog))
    }

    /// Number of live documents containing `term` after analysis. Text that
    /// analyzes to nothing (or to several terms) reports the first term only.
    pub fn term_document_frequency(&self, text: &str) -> Result<usize> {
        match self.store.analyzer().analyze(text).next() {
            Some(term) => self.store.term_document_frequency(&term),
            None => self.store.snapshot().map(|_| 0),
        }
    }

    /// Keyword search visible as of now.
    pub fn search(
        &self,
        text: &str,
        page_size: usize,
        page_offset: usize,
        blog: Option<BlogId>,
    ) -> Result<SearchResults> {
        self.search_as_of(text, page_size, page_offset, blog, Utc::now())
    }

    /// Keyword search against an explicit reference time.
    #[instrument(skip(self, text), fields(query_len = text.len()))]
    pub fn search_as_of(
        &self,
        text: &str,
        page_size: usize,
        page_offset: usize,
        blog: Option<BlogId>,
        as_of: DateTime<Utc>,
    ) -> Result<SearchResults> {
        let page = self.validate_page(page_size, page_offset)?;
        let max_len = self.config.max_query_length;
        if text.chars().count() > max_len {
            return Err(Error::InvalidQueryInput(format!(
                "query text exceeds {} characters",
                max_len
            )));
        }

        let snapshot = self.store.snapshot()?;
        let filter = VisibilityFilter::new(as_of, scope(blog));
        let results = query::search(
            &snapshot,
            self.store.analyzer(),
            &self.config.tuning.field_weights,
            text,
            &filter,
            page,
        );
        debug!(total = results.total, returned = results.len(), "search");
        Ok(results)
    }

    /// Documents related to `entry_id`, visible as of now.
    pub fn related_to(
        &self,
        entry_id: EntryId,
        page_size: usize,
        page_offset: usize,
        blog: Option<BlogId>,
    ) -> Result<SearchResults> {
        self.related_to_as_of(entry_id, page_size, page_offset, blog, Utc::now())
    }

    /// Related content against an explicit reference time. The source entry
    /// is never part of the result.
    #[instrument(skip(self))]
    pub fn related_to_as_of(
        &self,
        entry_id: EntryId,
        page_size: usize,
        page_offset: usize,
        blog: Option<BlogId>,
        as_of: DateTime<Utc>,
    ) -> Result<SearchResults> {
        let page = self.validate_page(page_size, page_offset)?;
        let snapshot = self.store.snapshot()?;
        let results = similarity::related_to(
            &snapshot,
            &self.config.tuning,
            entry_id,
            VisibilityFilter::new(as_of, scope(blog)),
            page,
        );
        debug!(total = results.total, returned = results.len(), "related");
        Ok(results)
    }

    fn validate_page(&self, size: usize, offset: usize) -> Result<Page> {
        let page = Page::new(size, offset);
        page.validate(self.config.max_page_size)?;
        Ok(page)
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.close();
    }
}

/// Blog id zero on a filter means "every blog".
fn scope(blog: Option<BlogId>) -> Option<BlogId> {
    blog.and_then(|b| BlogId::scope(b.get()))
}
