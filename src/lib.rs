// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Embedded full-text search for multi-blog publishing platforms.
//!
//! One engine indexes the entries of many blogs and answers two questions:
//! "which entries match these words" and "which entries are like this one".
//! Every answer honours publish state, publish date and blog scope.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ analyzer   │────▶│ index            │────▶│ query            │
//! │ (terms)    │     │ (postings, COW   │     │ (filter, tf-idf, │
//! └────────────┘     │  snapshots)      │     │  ranking, pages) │
//!                    └──────────────────┘     └──────────────────┘
//!                             │                        ▲
//!                             ▼                        │
//!                    ┌──────────────────┐     ┌──────────────────┐
//!                    │ storage          │     │ similarity       │
//!                    │ (memory, file)   │     │ (more like this) │
//!                    └──────────────────┘     └──────────────────┘
//!                                 ╲                 ╱
//!                                  ▼               ▼
//!                              ┌───────────────────────┐
//!                              │ engine (SearchEngine) │
//!                              └───────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use folio::{SearchEngine, TuningParameters};
//!
//! let engine = SearchEngine::open_dir("data/index", TuningParameters::default())?;
//! engine.add_or_update(entry)?;
//!
//! let page = engine.search("borrow checker", 10, 0, None)?;
//! println!("{} matches", page.total);
//! ```

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod logging;
pub mod query;
pub mod similarity;
pub mod storage;
pub mod testing;
pub mod types;

pub use analyzer::Analyzer;
pub use config::{EngineConfig, FieldWeights, StemmerLanguage, StopWordSet, TuningParameters};
pub use engine::SearchEngine;
pub use error::{Error, Result};
pub use index::Snapshot;
pub use storage::{FileStorage, IndexStorage, MemoryStorage};
pub use types::{BlogId, EntryId, Field, SearchDocument, SearchResult, SearchResults};
