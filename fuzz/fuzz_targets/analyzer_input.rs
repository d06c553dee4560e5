// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the text analyzer.
//!
//! Any string must analyze without panicking, twice to the same terms, and
//! into terms that are non-empty and lowercase.

#![no_main]

use folio::{Analyzer, TuningParameters};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    static ANALYZER: std::sync::OnceLock<Analyzer> = std::sync::OnceLock::new();
    let analyzer = ANALYZER.get_or_init(|| Analyzer::new(&TuningParameters::default()));

    let first: Vec<String> = analyzer.analyze(text).collect();
    let second: Vec<String> = analyzer.analyze(text).collect();
    assert_eq!(first, second, "analysis must be deterministic");

    for term in &first {
        assert!(!term.is_empty());
        assert!(term.chars().all(|c| !c.is_whitespace()));
    }
});
