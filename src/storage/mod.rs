// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where committed documents live between process restarts.
//!
//! The index store calls [`IndexStorage::persist`] with the complete document
//! set of the state it is about to publish. If that call fails, nothing is
//! published: the in-memory index stays exactly as it was before the write.
//! Implementations must therefore make `persist` all-or-nothing.

mod codec;
mod file;
mod memory;

pub use codec::{
    decode_snapshot, decode_snapshot_with_limit, encode_snapshot, SnapshotHeader, MAGIC,
    MAX_DECOMPRESSED_SIZE, VERSION,
};
pub use file::{FileStorage, SNAPSHOT_FILE};
pub use memory::MemoryStorage;

use crate::error::Result;
use crate::types::SearchDocument;
use std::sync::Arc;

/// Durable backing for an index store.
///
/// The store owns its storage exclusively for as long as it is open and drops
/// it on close, which is where implementations release their resources.
pub trait IndexStorage: Send {
    /// Read every committed document. An empty or missing store yields an
    /// empty vector.
    fn load(&mut self) -> Result<Vec<SearchDocument>>;

    /// Atomically replace the committed document set.
    fn persist(&mut self, documents: &[Arc<SearchDocument>]) -> Result<()>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}
