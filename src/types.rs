// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the index: what goes in and what comes out.
//!
//! A [`SearchDocument`] is one published entry as the publishing pipeline sees
//! it. A [`SearchResult`] is the projection handed back to callers, carrying
//! enough fields to render a result list without a second database lookup.
//!
//! # Invariants
//!
//! - **One live document per `EntryId`**: the store keys everything by entry id,
//!   re-adding an id replaces the previous version.
//! - **Blog id zero means "no blog"**: [`BlogId::scope`] folds `0` into `None`
//!   so that callers passing the legacy "0 = all blogs" sentinel get the
//!   unscoped behaviour.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Identifier of a content entry, unique across the whole index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        EntryId(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Tenant (blog) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(pub i64);

impl BlogId {
    /// Interpret a raw blog id as a scope: zero (and below) means "no blog".
    #[inline]
    pub fn scope(raw: i64) -> Option<BlogId> {
        (raw > 0).then_some(BlogId(raw))
    }

    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// The analysed text fields of a document.
///
/// Every field is tokenized and indexed. Only the [`Field::SEARCHABLE`] subset
/// takes part in keyword ranking and similarity term vectors; blog and entry
/// names are indexed for term statistics and stored for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Body,
    Tags,
    BlogName,
    EntryName,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Body,
        Field::Tags,
        Field::BlogName,
        Field::EntryName,
    ];

    pub const SEARCHABLE: [Field; 3] = [Field::Title, Field::Body, Field::Tags];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Body => "body",
            Field::Tags => "tags",
            Field::BlogName => "blogName",
            Field::EntryName => "entryName",
        }
    }

    #[inline]
    pub fn is_searchable(&self) -> bool {
        matches!(self, Field::Title | Field::Body | Field::Tags)
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// One indexed unit per content entry.
///
/// Documents are only ever replaced wholesale; there is no partial-field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    pub entry_id: EntryId,
    #[serde(default)]
    pub blog_id: Option<BlogId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub blog_name: String,
    #[serde(default)]
    pub entry_name: String,
    pub is_published: bool,
    pub publish_date: DateTime<Utc>,
}

impl SearchDocument {
    /// Raw text of one field.
    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Body => &self.body,
            Field::Tags => &self.tags,
            Field::BlogName => &self.blog_name,
            Field::EntryName => &self.entry_name,
        }
    }

    /// The tenant this document belongs to, with zero folded into `None`.
    #[inline]
    pub fn blog_scope(&self) -> Option<BlogId> {
        self.blog_id.and_then(|b| BlogId::scope(b.0))
    }

    /// Does this document belong to the given scope? `None` admits everything.
    #[inline]
    pub fn in_scope(&self, scope: Option<BlogId>) -> bool {
        match scope {
            None => true,
            Some(blog) => self.blog_scope() == Some(blog),
        }
    }
}

/// What callers get back for a matched document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub entry_id: EntryId,
    pub blog_id: Option<BlogId>,
    pub title: String,
    pub blog_name: String,
    pub entry_name: String,
    pub publish_date: DateTime<Utc>,
    pub score: f64,
}

impl SearchResult {
    pub fn from_document(doc: &SearchDocument, score: f64) -> Self {
        SearchResult {
            entry_id: doc.entry_id,
            blog_id: doc.blog_scope(),
            title: doc.title.clone(),
            blog_name: doc.blog_name.clone(),
            entry_name: doc.entry_name.clone(),
            publish_date: doc.publish_date,
            score,
        }
    }
}

/// A page of ranked results plus the size of the whole filtered match set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub results: Vec<SearchResult>,
    pub total: usize,
}

impl SearchResults {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn entry_ids(&self) -> Vec<EntryId> {
        self.results.iter().map(|r| r.entry_id).collect()
    }
}
