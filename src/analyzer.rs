// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text analysis: raw text in, normalized terms out.
//!
//! Indexing and querying must tokenize identically or recall silently breaks,
//! so there is exactly one code path. The pipeline for each word is:
//!
//! 1. Split on anything that is not alphanumeric (combining marks stay
//!    attached to their base letter)
//! 2. NFD-decompose, drop combining marks, lowercase ("Café" → "cafe")
//! 3. Drop words shorter than the minimum length
//! 4. Drop stop words (checked before stemming, so "this" is caught as typed)
//! 5. Stem to a root form ("posting" → "post")
//!
//! Analysis never fails. Input with no alphanumeric characters simply yields
//! no terms.

use crate::config::{StemmerLanguage, TuningParameters};
use rust_stemmers::Stemmer;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Configured, immutable text analyzer.
pub struct Analyzer {
    stop_words: HashSet<String>,
    stemmer: Option<(StemmerLanguage, Stemmer)>,
    minimum_word_length: usize,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("stop_words", &self.stop_words.len())
            .field("stemmer", &self.stemmer.as_ref().map(|(a, _)| *a))
            .field("minimum_word_length", &self.minimum_word_length)
            .finish()
    }
}

impl Analyzer {
    pub fn new(params: &TuningParameters) -> Self {
        Analyzer {
            stop_words: params.stop_words.build(),
            stemmer: params
                .stemmer
                .algorithm()
                .map(|algorithm| (params.stemmer, Stemmer::create(algorithm))),
            minimum_word_length: params.minimum_word_length,
        }
    }

    /// Lazily analyze `text`. Calling again on the same text restarts the
    /// sequence, and the returned iterator is `Clone`.
    pub fn analyze<'a>(&'a self, text: &'a str) -> Terms<'a> {
        Terms {
            analyzer: self,
            words: text.split(is_word_boundary as fn(char) -> bool),
        }
    }

    /// Term frequencies for one piece of text.
    pub fn term_frequencies(&self, text: &str) -> HashMap<String, u32> {
        let mut counts = HashMap::new();
        for term in self.analyze(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    /// Normalize one raw word, returning `None` when it is filtered out.
    fn term(&self, word: &str) -> Option<String> {
        if word.is_empty() {
            return None;
        }
        let normalized = normalize_word(word);
        if normalized.is_empty() || normalized.chars().count() < self.minimum_word_length {
            return None;
        }
        if self.stop_words.contains(&normalized) {
            return None;
        }
        let stemmed = match &self.stemmer {
            Some((_, stemmer)) => stemmer.stem(&normalized).into_owned(),
            None => normalized,
        };
        (!stemmed.is_empty()).then_some(stemmed)
    }
}

/// Iterator over the terms of one piece of text.
#[derive(Clone)]
pub struct Terms<'a> {
    analyzer: &'a Analyzer,
    words: std::str::Split<'a, fn(char) -> bool>,
}

impl Iterator for Terms<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for word in self.words.by_ref() {
            if let Some(term) = self.analyzer.term(word) {
                return Some(term);
            }
        }
        None
    }
}

/// Word boundary detection: anything that is neither alphanumeric nor a
/// combining mark separates words.
fn is_word_boundary(c: char) -> bool {
    !(c.is_alphanumeric() || is_combining_mark(c))
}

/// Lowercase a word and strip diacritics ("Naïve" → "naive").
#[cfg(feature = "unicode-normalization")]
pub(crate) fn normalize_word(word: &str) -> String {
    word.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Without unicode-normalization the input is assumed to be pre-normalized.
#[cfg(not(feature = "unicode-normalization"))]
pub(crate) fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
