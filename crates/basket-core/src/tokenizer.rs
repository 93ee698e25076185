//! # Tokenizer & Classifier
//!
//! Turns a raw request line into typed tokens.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Rice-2, Milk 12345 & 1/2 kg sugar!"                                   │
//! │         │                                                               │
//! │         ▼  normalize(): lower-case, drop everything but                 │
//! │            word chars, whitespace, '/', '.', '-'                        │
//! │  "rice-2 milk 12345  1/2 kg sugar"                                      │
//! │         │                                                               │
//! │         ▼  split on whitespace, classify each piece                     │
//! │  HyphenCompound("rice", 2)  Word("milk")  Identifier("12345")           │
//! │  Quantity(0.5)  Word("kg")  Word("sugar")                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Classification Priority
//! 1. Identifier: all digits, length within the configured bounds
//! 2. HyphenCompound: contains `-` and the text after the last `-` is a quantity
//!    (otherwise leading and trailing hyphens are trimmed, the rest is
//!    classified again, and a piece made only of hyphens is dropped)
//! 3. Quantity: `a/b` fraction or a plain decimal
//! 4. Stopword: member of the configured set
//! 5. Word: everything else
//!
//! Tokenizing never fails; anything unrecognized degrades to `Word`, and
//! stray punctuation produces no token at all.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use crate::config::ParserConfig;

/// Anything that is not a word character, whitespace, `/`, `.` or `-`.
static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s/.\-]").expect("noise pattern is valid"));

/// `12`, `1.5`, `.5`, `2.`; no signs, exponents or thousands separators.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("decimal pattern is valid")
});

// =============================================================================
// Token
// =============================================================================

/// A classified piece of a request line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A standalone amount such as `2`, `1.5` or `1/2`.
    Quantity(f64),

    /// A catalog identifier such as `12345`.
    Identifier(String),

    /// `name-qty` written as one token, split on the last hyphen.
    HyphenCompound { name: String, quantity: f64 },

    /// A filler word from the configured stopword set.
    Stopword(String),

    /// Part of an item name.
    Word(String),
}

// =============================================================================
// Normalization & Quantity Grammar
// =============================================================================

/// Lower-cases `raw` and strips punctuation noise.
///
/// ```rust
/// use basket_core::tokenizer::normalize;
///
/// assert_eq!(normalize("Rice 1/2kg, Milk!"), "rice 1/2kg milk");
/// assert_eq!(normalize("Coca-Cola 1.5L"), "coca-cola 1.5l");
/// ```
pub fn normalize(raw: &str) -> String {
    NOISE.replace_all(&raw.to_lowercase(), "").into_owned()
}

/// Parses `text` as an amount: either `a/b` with both sides decimal, or a
/// single decimal. Non-finite results (`1/0`) do not parse.
///
/// ```rust
/// use basket_core::tokenizer::parse_quantity;
///
/// assert_eq!(parse_quantity("1/2"), Some(0.5));
/// assert_eq!(parse_quantity("2.5"), Some(2.5));
/// assert_eq!(parse_quantity("1/0"), None);
/// assert_eq!(parse_quantity("2kg"), None);
/// ```
pub fn parse_quantity(text: &str) -> Option<f64> {
    let value = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = parse_decimal(numerator)?;
            let denominator = parse_decimal(denominator)?;
            numerator / denominator
        }
        None => parse_decimal(text)?,
    };

    value.is_finite().then_some(value)
}

fn parse_decimal(text: &str) -> Option<f64> {
    if DECIMAL.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

// =============================================================================
// Tokenizer
// =============================================================================

/// Splits and classifies request text against a [`ParserConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    config: &'a ParserConfig,
}

impl<'a> Tokenizer<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Tokenizer { config }
    }

    /// Normalizes `raw` and classifies every whitespace-separated piece.
    pub fn tokenize(&self, raw: &str) -> Vec<Token> {
        let normalized = normalize(raw);
        let tokens: Vec<Token> = normalized
            .split_whitespace()
            .filter_map(|piece| self.classify(piece))
            .collect();

        trace!(input = %raw, ?tokens, "Tokenized request");
        tokens
    }

    /// Classifies one already-normalized piece. `None` for bare hyphens.
    pub fn classify(&self, piece: &str) -> Option<Token> {
        if self.config.is_identifier(piece) {
            return Some(Token::Identifier(piece.to_string()));
        }

        if let Some((name, suffix)) = piece.rsplit_once('-') {
            if let Some(quantity) = parse_quantity(suffix) {
                return Some(Token::HyphenCompound {
                    name: name.to_string(),
                    quantity,
                });
            }

            // Interior hyphens belong to the name (`coca-cola`)
            let trimmed = piece.trim_matches('-');
            if trimmed.is_empty() {
                return None;
            }
            if trimmed.len() != piece.len() {
                return self.classify(trimmed);
            }
            return Some(Token::Word(piece.to_string()));
        }

        if let Some(quantity) = parse_quantity(piece) {
            return Some(Token::Quantity(quantity));
        }

        if self.config.is_stopword(piece) {
            return Some(Token::Stopword(piece.to_string()));
        }

        Some(Token::Word(piece.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(raw: &str) -> Vec<Token> {
        Tokenizer::new(&ParserConfig::default()).tokenize(raw)
    }

    fn word(w: &str) -> Token {
        Token::Word(w.to_string())
    }

    #[test]
    fn test_normalize_strips_noise_keeps_grammar() {
        assert_eq!(normalize("Rice, Milk & Bread!!"), "rice milk  bread");
        assert_eq!(normalize("1/2kg"), "1/2kg");
        assert_eq!(normalize("rice-2"), "rice-2");
        assert_eq!(normalize("ÄPFEL 3"), "äpfel 3");
    }

    #[test]
    fn test_classification_order() {
        assert_eq!(
            tokenize("12345 2 rice please"),
            vec![
                Token::Identifier("12345".into()),
                Token::Quantity(2.0),
                word("rice"),
                Token::Stopword("please".into()),
            ]
        );
    }

    #[test]
    fn test_identifier_digit_bounds() {
        assert_eq!(tokenize("1234"), vec![Token::Quantity(1234.0)]);
        assert_eq!(tokenize("12345678"), vec![Token::Identifier("12345678".into())]);
        assert_eq!(tokenize("123456789"), vec![Token::Quantity(123456789.0)]);
    }

    #[test]
    fn test_hyphen_compound_uses_last_hyphen() {
        assert_eq!(
            tokenize("coca-cola-2"),
            vec![Token::HyphenCompound {
                name: "coca-cola".into(),
                quantity: 2.0
            }]
        );
        assert_eq!(
            tokenize("rice-1/2"),
            vec![Token::HyphenCompound {
                name: "rice".into(),
                quantity: 0.5
            }]
        );
    }

    #[test]
    fn test_hyphen_without_quantity_is_word() {
        assert_eq!(tokenize("coca-cola"), vec![word("coca-cola")]);
        assert_eq!(tokenize("rice-1/0"), vec![word("rice-1/0")]);
    }

    #[test]
    fn test_stray_hyphens_are_dropped() {
        assert!(tokenize("-").is_empty());
        assert!(tokenize("-- ---").is_empty());
        assert_eq!(
            tokenize("rice - 2"),
            vec![word("rice"), Token::Quantity(2.0)]
        );
        assert_eq!(tokenize("rice- -milk"), vec![word("rice"), word("milk")]);
        assert_eq!(tokenize("2-"), vec![Token::Quantity(2.0)]);
        assert_eq!(
            tokenize("-please-"),
            vec![Token::Stopword("please".into())]
        );
    }

    #[test]
    fn test_fractions_and_decimals() {
        assert_eq!(tokenize("1/2"), vec![Token::Quantity(0.5)]);
        assert_eq!(tokenize("1.5"), vec![Token::Quantity(1.5)]);
        assert_eq!(tokenize(".5"), vec![Token::Quantity(0.5)]);
        assert_eq!(tokenize("1/2/3"), vec![word("1/2/3")]);
        assert_eq!(tokenize("1/2kg"), vec![word("1/2kg")]);
    }

    #[test]
    fn test_non_finite_fraction_degrades_to_word() {
        assert_eq!(tokenize("1/0"), vec![word("1/0")]);
        assert_eq!(tokenize("0/0"), vec![word("0/0")]);
    }

    #[test]
    fn test_rejects_float_syntax_outside_grammar() {
        assert_eq!(parse_quantity("inf"), None);
        assert_eq!(parse_quantity("nan"), None);
        assert_eq!(parse_quantity("1e3"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("."), None);
    }

    #[test]
    fn test_swapped_stopwords() {
        let config = ParserConfig::with_stopwords(["rice"]);
        let tokens = Tokenizer::new(&config).tokenize("please rice");
        assert_eq!(
            tokens,
            vec![word("please"), Token::Stopword("rice".into())]
        );
    }

    #[test]
    fn test_punctuation_only_input() {
        assert!(tokenize("!!! ,,, ???").is_empty());
        assert!(tokenize("").is_empty());
    }
}
