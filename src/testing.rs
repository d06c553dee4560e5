// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::error::{Error, Result};
use crate::storage::{IndexStorage, MemoryStorage};
use crate::types::{BlogId, EntryId, SearchDocument};
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A fixed reference time, so tests never depend on the wall clock.
pub fn reference_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

/// Create a published, unscoped entry with the given body.
///
/// Title and tags are left empty so that only `body` contributes terms to the
/// ranked fields.
pub fn make_entry(id: i64, body: &str) -> SearchDocument {
    SearchDocument {
        entry_id: EntryId(id),
        blog_id: None,
        title: String::new(),
        body: body.to_string(),
        tags: String::new(),
        blog_name: "MyTestBlog".to_string(),
        entry_name: format!("entry-{}", id),
        is_published: true,
        publish_date: reference_time() - Duration::days(1),
    }
}

/// Create a published entry belonging to a blog.
pub fn make_entry_in_blog(id: i64, blog: i64, body: &str) -> SearchDocument {
    SearchDocument {
        blog_id: Some(BlogId(blog)),
        ..make_entry(id, body)
    }
}

/// The fixture used throughout the related-content tests: identical posts.
pub fn make_sample_post(id: i64, blog: Option<i64>) -> SearchDocument {
    SearchDocument {
        entry_id: EntryId(id),
        blog_id: blog.map(BlogId),
        title: "This is the title of the post".to_string(),
        body: "This is a sample post".to_string(),
        tags: ".net, mvc, post".to_string(),
        blog_name: "MyTestBlog".to_string(),
        entry_name: "this-is-the-title".to_string(),
        is_published: true,
        publish_date: reference_time() - Duration::hours(1),
    }
}

/// Memory storage whose next `persist` can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_next: Arc<AtomicBool>,
}

impl FailingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next persist call fail with an I/O error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl IndexStorage for FailingStorage {
    fn load(&mut self) -> Result<Vec<SearchDocument>> {
        self.inner.load()
    }

    fn persist(&mut self, documents: &[Arc<SearchDocument>]) -> Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::other("injected write failure")));
        }
        self.inner.persist(documents)
    }

    fn describe(&self) -> String {
        "failing-memory".to_string()
    }
}
