// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index store: one writer, many readers, no torn states.
//!
//! # Concurrency model
//!
//! ```text
//!   writer mutex ──▶ clone current state ──▶ mutate copy ──▶ persist ──▶ swap
//!                                                                        │
//!   readers ──▶ snapshot() = Arc clone of current ◀──────────────────────┘
//! ```
//!
//! - Mutations (`upsert`, `remove`, `clear`) are serialized by one mutex that
//!   also owns the storage handle. Analysis happens before the mutex is taken.
//! - Publishing is a pointer swap under a write lock, so readers wait at most
//!   for the swap, never for analysis or I/O.
//! - A snapshot is an `Arc` of an immutable state. Writes after it was taken
//!   are invisible through it, and every write is visible to snapshots taken
//!   after the write returns (read-your-writes, no background commit).
//! - If persisting fails, the swap never happens: the store keeps serving the
//!   pre-write state and the error goes back to the caller.
//! - After `close`, every operation returns [`Error::EngineClosed`].

use super::posting::{analyze_document, analyze_documents, AnalyzedDocument};
use super::state::IndexState;
use crate::analyzer::Analyzer;
use crate::error::{Error, Result};
use crate::storage::IndexStorage;
use crate::types::{BlogId, EntryId, SearchDocument};
use parking_lot::{Mutex, RwLock};
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-consistent view of the index at the moment it was taken.
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: Arc<IndexState>,
}

impl Deref for Snapshot {
    type Target = IndexState;

    fn deref(&self) -> &IndexState {
        &self.state
    }
}

pub struct IndexStore {
    analyzer: Arc<Analyzer>,
    /// `None` once closed.
    current: RwLock<Option<Arc<IndexState>>>,
    /// Writer lock and storage handle in one: holding the guard is the
    /// right to mutate. `None` once closed.
    writer: Mutex<Option<Box<dyn IndexStorage>>>,
}

impl std::fmt::Debug for IndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexStore")
            .field("open", &self.is_open())
            .field("analyzer", &self.analyzer)
            .finish()
    }
}

impl IndexStore {
    /// Open a store, rebuilding postings from every persisted document.
    pub fn open(analyzer: Arc<Analyzer>, mut storage: Box<dyn IndexStorage>) -> Result<Self> {
        let documents = storage.load()?;
        let loaded = documents.len();
        let state = IndexState::from_documents(analyze_documents(&analyzer, documents));
        info!(
            storage = %storage.describe(),
            documents = loaded,
            terms = state.term_count(),
            "opened index store"
        );

        Ok(IndexStore {
            analyzer,
            current: RwLock::new(Some(Arc::new(state))),
            writer: Mutex::new(Some(storage)),
        })
    }

    pub fn analyzer(&self) -> &Arc<Analyzer> {
        &self.analyzer
    }

    pub fn is_open(&self) -> bool {
        self.current.read().is_some()
    }

    /// Current committed state.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.current
            .read()
            .as_ref()
            .map(|state| Snapshot {
                state: Arc::clone(state),
            })
            .ok_or(Error::EngineClosed)
    }

    /// Insert or atomically replace one document.
    pub fn upsert(&self, document: SearchDocument) -> Result<()> {
        let analyzed = analyze_document(&self.analyzer, document);
        let entry_id = analyzed.entry_id();
        self.write(|state| {
            let replaced = state.insert(analyzed).is_some();
            debug!(%entry_id, replaced, "upserted document");
            true
        })?;
        Ok(())
    }

    /// Insert or replace many documents in a single commit.
    ///
    /// When the batch holds the same entry id twice, the later one wins.
    pub fn upsert_many(&self, documents: Vec<SearchDocument>) -> Result<usize> {
        if documents.is_empty() {
            // Still report a closed store.
            self.snapshot()?;
            return Ok(0);
        }
        let analyzed: Vec<AnalyzedDocument> = analyze_documents(&self.analyzer, documents);
        let count = analyzed.len();
        self.write(|state| {
            for doc in analyzed {
                state.insert(doc);
            }
            true
        })?;
        debug!(count, "upserted batch");
        Ok(count)
    }

    /// Delete one document. Returns whether it existed; absence is not an error.
    pub fn remove(&self, entry_id: EntryId) -> Result<bool> {
        let removed = self.write(|state| state.remove(entry_id).is_some())?;
        debug!(%entry_id, removed, "remove");
        Ok(removed)
    }

    /// Delete every document in one commit.
    pub fn clear(&self) -> Result<bool> {
        self.write(IndexState::clear)
    }

    pub fn document_count(&self, scope: Option<BlogId>) -> Result<usize> {
        Ok(self.snapshot()?.document_count(scope))
    }

    /// Number of live documents containing an already-analyzed term.
    pub fn term_document_frequency(&self, term: &str) -> Result<usize> {
        Ok(self.snapshot()?.document_frequency(term))
    }

    /// Release the storage handle. Safe to call any number of times.
    pub fn close(&self) {
        let mut writer = self.writer.lock();
        if let Some(storage) = writer.take() {
            *self.current.write() = None;
            info!(storage = %storage.describe(), "closed index store");
        }
    }

    /// Apply `mutate` to a private copy of the current state and publish it.
    ///
    /// `mutate` returns whether it changed anything; unchanged copies are
    /// discarded without touching storage.
    fn write<F>(&self, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut IndexState) -> bool,
    {
        let mut writer = self.writer.lock();
        let storage = writer.as_mut().ok_or(Error::EngineClosed)?;
        let base = self.current.read().clone().ok_or(Error::EngineClosed)?;

        let mut next = IndexState::clone(&base);
        drop(base);
        if !mutate(&mut next) {
            return Ok(false);
        }
        next.advance_generation();

        if let Err(e) = storage.persist(&next.shared_documents()) {
            warn!(error = %e, generation = next.generation(), "commit failed, keeping previous state");
            return Err(e);
        }
        *self.current.write() = Some(Arc::new(next));
        Ok(true)
    }
}

impl Drop for IndexStore {
    fn drop(&mut self) {
        self.close();
    }
}
