//! # Parser Configuration
//!
//! The request grammar's tunable data: the stopword set and the digit
//! bounds that make a token a catalog identifier.
//!
//! Loading this from disk or the environment is the caller's job
//! (see `basket-service`); here it is a plain value.
//!
//! ```rust
//! use basket_core::ParserConfig;
//!
//! let config = ParserConfig::default();
//! assert!(config.is_stopword("please"));
//! assert!(config.is_stopword("PLEASE"));
//! assert!(!config.is_stopword("rice"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{CoreError, CoreResult};

/// Filler words common in conversational requests ("bro i want 2 rice").
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "bro", "i", "want", "need", "give", "add", "just", "only", "means", "that", "item", "and",
    "please", "to", "for", "a", "of",
];

/// Tunable grammar for the request parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Lower-cased filler words and phrases. Stored normalized.
    #[serde(default = "default_stopwords", deserialize_with = "deserialize_stopwords")]
    stopwords: BTreeSet<String>,

    /// Shortest all-digit token treated as a catalog identifier.
    #[serde(default = "default_min_identifier_digits")]
    pub min_identifier_digits: usize,

    /// Longest all-digit token treated as a catalog identifier.
    #[serde(default = "default_max_identifier_digits")]
    pub max_identifier_digits: usize,
}

fn default_stopwords() -> BTreeSet<String> {
    DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

fn default_min_identifier_digits() -> usize {
    5
}

fn default_max_identifier_digits() -> usize {
    8
}

fn deserialize_stopwords<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().filter_map(|w| normalize_phrase(w)).collect())
}

/// Lower-cases and collapses inner whitespace; `None` for blank input.
fn normalize_phrase(phrase: &str) -> Option<String> {
    let normalized = phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    (!normalized.is_empty()).then_some(normalized)
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            stopwords: default_stopwords(),
            min_identifier_digits: default_min_identifier_digits(),
            max_identifier_digits: default_max_identifier_digits(),
        }
    }
}

impl ParserConfig {
    /// Default digit bounds with a caller-supplied stopword set.
    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ParserConfig {
            stopwords: stopwords
                .into_iter()
                .filter_map(|w| normalize_phrase(w.as_ref()))
                .collect(),
            ..Self::default()
        }
    }

    /// Replaces the stopword set.
    pub fn set_stopwords<I, S>(&mut self, stopwords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords = stopwords
            .into_iter()
            .filter_map(|w| normalize_phrase(w.as_ref()))
            .collect();
    }

    /// Case-insensitive, whole-phrase membership test.
    pub fn is_stopword(&self, word: &str) -> bool {
        normalize_phrase(word).is_some_and(|w| self.stopwords.contains(&w))
    }

    /// Iterates the normalized stopwords in sorted order.
    pub fn stopwords(&self) -> impl Iterator<Item = &str> {
        self.stopwords.iter().map(String::as_str)
    }

    /// True when `token` has the shape of a catalog identifier.
    pub fn is_identifier(&self, token: &str) -> bool {
        (self.min_identifier_digits..=self.max_identifier_digits).contains(&token.len())
            && token.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.min_identifier_digits == 0 {
            return Err(CoreError::InvalidConfig(
                "min_identifier_digits must be greater than 0".into(),
            ));
        }

        if self.min_identifier_digits > self.max_identifier_digits {
            return Err(CoreError::InvalidConfig(format!(
                "min_identifier_digits ({}) exceeds max_identifier_digits ({})",
                self.min_identifier_digits, self.max_identifier_digits
            )));
        }

        Ok(())
    }
}
