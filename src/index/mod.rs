// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index store: postings, stored documents, and snapshot isolation.
//!
//! `posting` turns documents into term vectors, `state` is the inverted index
//! as a value, and `store` owns the current value plus the storage handle and
//! enforces the single-writer discipline.

mod posting;
mod state;
mod store;

pub use posting::{analyze_document, analyze_documents, AnalyzedDocument, Posting, PostingList};
pub use state::IndexState;
pub use store::{IndexStore, Snapshot};
