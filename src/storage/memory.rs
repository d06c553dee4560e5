// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Volatile storage.
//!
//! Clones share the same backing list, so a test can close one engine and open
//! another (say, with different tuning) over the same documents.

use super::IndexStorage;
use crate::error::Result;
use crate::types::SearchDocument;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: Arc<Mutex<Vec<Arc<SearchDocument>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in the last committed set.
    pub fn committed_len(&self) -> usize {
        self.documents.lock().len()
    }
}

impl IndexStorage for MemoryStorage {
    fn load(&mut self) -> Result<Vec<SearchDocument>> {
        Ok(self
            .documents
            .lock()
            .iter()
            .map(|doc| SearchDocument::clone(doc))
            .collect())
    }

    fn persist(&mut self, documents: &[Arc<SearchDocument>]) -> Result<()> {
        *self.documents.lock() = documents.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
