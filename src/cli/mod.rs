// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the folio command-line interface.
//!
//! Every subcommand works on one index directory (`--dir`). `index` bulk-loads
//! JSON documents, `remove` deletes entries, `search` and `related` query, and
//! `stats` reports counts. Query commands print a table on a terminal and
//! JSON with `--json`.

pub mod display;
pub mod load;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Full-text and related-content search for multi-blog sites",
    version
)]
pub struct Cli {
    /// Index directory (created on first use)
    #[arg(short, long, global = true, default_value = "folio-index")]
    pub dir: PathBuf,

    /// JSON engine configuration (tuning parameters, page limits)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: tracing::Level,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Paging and scope shared by the query commands.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Number of ranked results to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Restrict results to one blog (0 means every blog)
    #[arg(short, long)]
    pub blog: Option<i64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add or update documents from a JSON file or a directory of JSON files
    ///
    /// Each file holds either one document or an array of documents. Later
    /// documents with the same entry id replace earlier ones.
    Index {
        /// JSON file or directory
        input: PathBuf,

        /// Documents committed per write
        #[arg(long, default_value = "500")]
        batch_size: usize,
    },

    /// Remove documents by entry id
    Remove {
        /// Entry ids to remove
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Keyword search
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// Find entries related to an existing one
    Related {
        /// Source entry id
        entry_id: i64,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// Show document counts
    Stats {
        /// Count one blog only
        #[arg(short, long)]
        blog: Option<i64>,

        /// Print counts as JSON
        #[arg(long)]
        json: bool,
    },
}
