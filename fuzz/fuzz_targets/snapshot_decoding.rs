// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for snapshot decoding.
//!
//! Random bytes must be rejected with an error, never a panic or an
//! unbounded allocation. Valid snapshots must survive a decode/encode cycle.

#![no_main]

use folio::storage::{decode_snapshot, decode_snapshot_with_limit, encode_snapshot};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

/// Well under libFuzzer's default RSS limit.
const DECOMPRESSED_LIMIT: usize = 64 * 1024 * 1024;

fuzz_target!(|data: &[u8]| {
    if let Ok(documents) = decode_snapshot_with_limit(data, DECOMPRESSED_LIMIT) {
        let shared: Vec<Arc<_>> = documents.iter().cloned().map(Arc::new).collect();
        let bytes = encode_snapshot(&shared).expect("re-encode decoded snapshot");
        let again = decode_snapshot(&bytes).expect("decode re-encoded snapshot");
        assert_eq!(documents, again);
    }
});
