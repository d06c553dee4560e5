// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! [`TuningParameters`] controls analysis and "more like this" term selection.
//! [`EngineConfig`] wraps it with the guard rails applied to query input.
//! Both are immutable once an engine is built; to change them, open a new
//! engine over the same storage and the postings are rebuilt with the new
//! analyzer on load.
//!
//! Configuration files are JSON with camelCase keys. Every key is optional:
//!
//! ```json
//! {
//!   "tuning": {
//!     "minimumDocumentFrequency": 3,
//!     "maximumQueryTerms": 10,
//!     "stopWords": { "custom": ["blog", "post"] },
//!     "stemmer": "english"
//!   },
//!   "maxPageSize": 200
//! }
//! ```

use crate::analyzer::normalize_word;
use crate::error::{Error, Result};
use crate::types::Field;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// The classic English stop list used by Lucene's `StopAnalyzer`.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

// =============================================================================
// ANALYSIS SETTINGS
// =============================================================================

/// Which stop words the analyzer drops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum StopWordSet {
    #[default]
    English,
    None,
    Custom(Vec<String>),
}

impl StopWordSet {
    /// Materialize the set. Custom words get the analyzer's word
    /// normalization (diacritics folded, lowercased) so they match its output.
    pub fn build(&self) -> HashSet<String> {
        match self {
            StopWordSet::English => ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            StopWordSet::None => HashSet::new(),
            StopWordSet::Custom(words) => words.iter().map(|w| normalize_word(w)).collect(),
        }
    }
}

/// Stemming algorithm applied after stop-word removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum StemmerLanguage {
    None,
    #[default]
    English,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
    Swedish,
}

impl StemmerLanguage {
    pub(crate) fn algorithm(self) -> Option<rust_stemmers::Algorithm> {
        use rust_stemmers::Algorithm;
        match self {
            StemmerLanguage::None => None,
            StemmerLanguage::English => Some(Algorithm::English),
            StemmerLanguage::French => Some(Algorithm::French),
            StemmerLanguage::German => Some(Algorithm::German),
            StemmerLanguage::Spanish => Some(Algorithm::Spanish),
            StemmerLanguage::Italian => Some(Algorithm::Italian),
            StemmerLanguage::Portuguese => Some(Algorithm::Portuguese),
            StemmerLanguage::Dutch => Some(Algorithm::Dutch),
            StemmerLanguage::Swedish => Some(Algorithm::Swedish),
        }
    }
}

/// Per-field multipliers applied to keyword scores.
///
/// Title outranks tags outranks body, the same hierarchy the field-type scoring
/// of a document search engine uses. Fields outside [`Field::SEARCHABLE`]
/// always weigh zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldWeights {
    pub title: f64,
    pub body: f64,
    pub tags: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        FieldWeights {
            title: 2.0,
            body: 1.0,
            tags: 1.5,
        }
    }
}

impl FieldWeights {
    #[inline]
    pub fn weight(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.title,
            Field::Body => self.body,
            Field::Tags => self.tags,
            Field::BlogName | Field::EntryName => 0.0,
        }
    }
}

// =============================================================================
// TUNING PARAMETERS
// =============================================================================

/// Engine-wide tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TuningParameters {
    /// Terms found in fewer live documents than this are never used as
    /// similarity terms.
    pub minimum_document_frequency: usize,
    /// Terms occurring fewer times than this in the source document are never
    /// used as similarity terms.
    pub minimum_term_frequency: usize,
    /// Upper bound on the number of terms in a similarity query.
    pub maximum_query_terms: usize,
    /// Analyzer drops terms shorter than this many characters.
    pub minimum_word_length: usize,
    pub stop_words: StopWordSet,
    pub stemmer: StemmerLanguage,
    /// Weight similarity terms by their relative frequency in the source.
    pub boost_terms: bool,
    pub field_weights: FieldWeights,
}

impl Default for TuningParameters {
    fn default() -> Self {
        TuningParameters {
            minimum_document_frequency: 2,
            minimum_term_frequency: 1,
            maximum_query_terms: 25,
            minimum_word_length: 2,
            stop_words: StopWordSet::English,
            stemmer: StemmerLanguage::English,
            boost_terms: true,
            field_weights: FieldWeights::default(),
        }
    }
}

impl TuningParameters {
    pub fn with_minimum_document_frequency(mut self, value: usize) -> Self {
        self.minimum_document_frequency = value;
        self
    }

    pub fn with_minimum_term_frequency(mut self, value: usize) -> Self {
        self.minimum_term_frequency = value;
        self
    }

    pub fn with_boost_terms(mut self, boost: bool) -> Self {
        self.boost_terms = boost;
        self
    }

    pub fn with_field_weights(mut self, weights: FieldWeights) -> Self {
        self.field_weights = weights;
        self
    }

    pub fn with_maximum_query_terms(mut self, value: usize) -> Self {
        self.maximum_query_terms = value;
        self
    }

    pub fn with_minimum_word_length(mut self, value: usize) -> Self {
        self.minimum_word_length = value;
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWordSet) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_stemmer(mut self, stemmer: StemmerLanguage) -> Self {
        self.stemmer = stemmer;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.maximum_query_terms == 0 {
            return Err(Error::InvalidConfig(
                "maximumQueryTerms must be at least 1".into(),
            ));
        }
        let weights = &self.field_weights;
        for (name, w) in [
            ("title", weights.title),
            ("body", weights.body),
            ("tags", weights.tags),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "field weight for {} must be a non-negative number, got {}",
                    name, w
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// ENGINE CONFIG
// =============================================================================

pub const DEFAULT_MAX_PAGE_SIZE: usize = 1000;
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub tuning: TuningParameters,
    /// Largest page a single search may request.
    pub max_page_size: usize,
    /// Longest query text accepted, in characters.
    pub max_query_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tuning: TuningParameters::default(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
        }
    }
}

impl From<TuningParameters> for EngineConfig {
    fn from(tuning: TuningParameters) -> Self {
        EngineConfig {
            tuning,
            ..EngineConfig::default()
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(Error::InvalidConfig("maxPageSize must be at least 1".into()));
        }
        if self.max_query_length == 0 {
            return Err(Error::InvalidConfig(
                "maxQueryLength must be at least 1".into(),
            ));
        }
        self.tuning.validate()
    }
}
