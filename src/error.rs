// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types shared by every layer of the engine.
//!
//! There is no "document not found" variant. Removing an absent
//! entry succeeds, and asking for content related to an absent entry returns
//! an empty page. Everything that *can* go wrong is listed here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The engine (or the store beneath it) has been closed.
    #[error("search engine is closed")]
    EngineClosed,

    /// Caller-supplied query parameters were rejected before touching the index.
    #[error("invalid query input: {0}")]
    InvalidQueryInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted snapshot failed its magic, version or checksum validation.
    #[error("corrupt index snapshot: {0}")]
    Corrupt(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True when the failure came from the storage layer rather than the caller.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Corrupt(_) | Error::Serialization(_))
    }
}
