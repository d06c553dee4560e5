// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading documents for bulk indexing.
//!
//! Input is a JSON file or a directory of `*.json` files. Each file holds one
//! document or an array of them. Directory entries are read in parallel and
//! then ordered by file name, so the last occurrence of an entry id is the
//! same on every run.

use anyhow::{Context, Result};
use folio::SearchDocument;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Many(Vec<SearchDocument>),
    One(Box<SearchDocument>),
}

impl DocumentFile {
    fn into_documents(self) -> Vec<SearchDocument> {
        match self {
            DocumentFile::Many(docs) => docs,
            DocumentFile::One(doc) => vec![*doc],
        }
    }
}

/// Read every document under `input`, in a stable order.
pub fn load_documents(input: &Path) -> Result<Vec<SearchDocument>> {
    if !input.is_dir() {
        return load_file(input);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(input)
        .with_context(|| format!("failed to read directory {}", input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    #[cfg(feature = "parallel")]
    let loaded: Vec<Vec<SearchDocument>> = files
        .par_iter()
        .map(|path| load_file(path))
        .collect::<Result<_>>()?;
    #[cfg(not(feature = "parallel"))]
    let loaded: Vec<Vec<SearchDocument>> = files
        .iter()
        .map(|path| load_file(path))
        .collect::<Result<_>>()?;

    Ok(loaded.into_iter().flatten().collect())
}

fn load_file(path: &Path) -> Result<Vec<SearchDocument>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file: DocumentFile = serde_json::from_str(&content)
        .with_context(|| format!("invalid document JSON in {}", path.display()))?;
    Ok(file.into_documents())
}
