// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The mandatory visibility filter and result paging.
//!
//! Every candidate passes through [`VisibilityFilter::admits`] before it is
//! counted or ranked, so hidden documents never leak into totals or pages.

use crate::error::{Error, Result};
use crate::types::{BlogId, EntryId, SearchDocument};
use chrono::{DateTime, Utc};

/// Which documents a query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityFilter {
    /// Documents published after this instant are not yet visible.
    pub as_of: DateTime<Utc>,
    /// Restrict to one blog; `None` admits every blog (and unscoped records).
    pub scope: Option<BlogId>,
    /// A document that must never be returned (the source of a related query).
    pub exclude: Option<EntryId>,
}

impl VisibilityFilter {
    pub fn new(as_of: DateTime<Utc>, scope: Option<BlogId>) -> Self {
        VisibilityFilter {
            as_of,
            scope,
            exclude: None,
        }
    }

    pub fn excluding(mut self, entry_id: EntryId) -> Self {
        self.exclude = Some(entry_id);
        self
    }

    /// `isPublished ∧ publishDate ≤ asOf ∧ (scope absent ∨ blogId = scope) ∧ id ≠ excluded`
    #[inline]
    pub fn admits(&self, doc: &SearchDocument) -> bool {
        doc.is_published
            && doc.publish_date <= self.as_of
            && doc.in_scope(self.scope)
            && self.exclude != Some(doc.entry_id)
    }
}

/// A contiguous window into a ranked result list.
///
/// `offset` counts results, not pages: `Page::new(10, 20)` returns results
/// 21 through 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub size: usize,
    pub offset: usize,
}

impl Page {
    pub fn new(size: usize, offset: usize) -> Self {
        Page { size, offset }
    }

    /// Reject pages that are empty or larger than `max_size`.
    pub fn validate(&self, max_size: usize) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidQueryInput(
                "page size must be at least 1".into(),
            ));
        }
        if self.size > max_size {
            return Err(Error::InvalidQueryInput(format!(
                "page size {} exceeds the maximum of {}",
                self.size, max_size
            )));
        }
        Ok(())
    }

    /// Take this page's window out of a fully ranked list.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.size)
            .collect()
    }
}
