// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Directory-backed storage holding a single snapshot file.
//!
//! Commits write the new snapshot to a temporary sibling, fsync it, and rename
//! it over the live file. A crash at any point leaves either the old snapshot
//! or the new one on disk, never a torn mix.
//!
//! The rename is the commit point. A failed directory fsync afterwards is
//! logged but not returned: the new snapshot is already the live file, and
//! reporting failure would let a "failed" write reappear after a restart.

use super::codec::{decode_snapshot, encode_snapshot};
use super::IndexStorage;
use crate::error::Result;
use crate::types::SearchDocument;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Snapshot file name inside the index directory.
pub const SNAPSHOT_FILE: &str = "index.folio";
const TEMP_FILE: &str = "index.folio.tmp";

#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) an index directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        // Leftover from a crash mid-commit; the live snapshot is still intact.
        match fs::remove_file(dir.join(TEMP_FILE)) {
            Ok(()) => debug!(dir = %dir.display(), "removed stale temporary snapshot"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    #[cfg(unix)]
    fn sync_dir(&self) -> Result<()> {
        File::open(&self.dir)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_dir(&self) -> Result<()> {
        Ok(())
    }
}

impl IndexStorage for FileStorage {
    fn load(&mut self) -> Result<Vec<SearchDocument>> {
        let bytes = match fs::read(self.snapshot_path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        decode_snapshot(&bytes)
    }

    fn persist(&mut self, documents: &[Arc<SearchDocument>]) -> Result<()> {
        let bytes = encode_snapshot(documents)?;
        let temp = self.dir.join(TEMP_FILE);

        let written = (|| -> Result<()> {
            let mut file = File::create(&temp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            fs::rename(&temp, self.snapshot_path())?;
            Ok(())
        })();
        if let Err(e) = written {
            let _ = fs::remove_file(&temp);
            return Err(e);
        }

        if let Err(e) = self.sync_dir() {
            warn!(dir = %self.dir.display(), error = %e, "snapshot committed but directory fsync failed");
        }
        debug!(
            documents = documents.len(),
            bytes = bytes.len(),
            "persisted snapshot"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
