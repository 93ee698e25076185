//! # Item Accumulator
//!
//! A single-pass state machine that folds a token stream into
//! [`ParsedItem`]s.
//!
//! ## State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  current_name        words of the item being named                      │
//! │  pending_quantity    amount for that item (or the next one)             │
//! │  current_identifier  catalog id seen while naming it                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transitions
//! ```text
//! Word(w)                  push w onto current_name
//! Identifier(id)           current_identifier = id
//! Quantity(q), named       pending = q, flush
//! Quantity(q), unnamed     flush (no-op), pending = q   (applies to next item)
//! Stopword("and"), named   flush
//! Stopword(_)              ignored
//! HyphenCompound(n, q)     flush, emit n × q with current_identifier, clear id
//! end of input             flush
//! ```
//!
//! Flush emits `current_name` title-cased with `pending_quantity` (default 1)
//! and resets all three fields. It is a no-op while `current_name` is empty.
//! Candidates whose name is empty, a stopword, or whose quantity is not
//! positive are dropped without error.

use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::quantity::Quantity;
use crate::tokenizer::Token;
use crate::types::ParsedItem;

/// The only stopword that closes the item being named.
const ITEM_SEPARATOR: &str = "and";

/// Scan state threaded through [`accumulate`].
#[derive(Debug)]
pub struct Accumulator<'a> {
    config: &'a ParserConfig,
    current_name: Vec<String>,
    pending_quantity: Option<f64>,
    current_identifier: Option<String>,
    items: Vec<ParsedItem>,
}

impl<'a> Accumulator<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Accumulator {
            config,
            current_name: Vec::new(),
            pending_quantity: None,
            current_identifier: None,
            items: Vec::new(),
        }
    }

    /// Applies one token.
    pub fn feed(&mut self, token: Token) {
        match token {
            Token::Identifier(id) => self.current_identifier = Some(id),
            Token::HyphenCompound { name, quantity } => {
                self.flush();
                let identifier = self.current_identifier.take();
                self.emit(name.split('-'), quantity, identifier);
            }
            Token::Quantity(quantity) => {
                if self.current_name.is_empty() {
                    self.flush();
                    self.pending_quantity = Some(quantity);
                } else {
                    self.pending_quantity = Some(quantity);
                    self.flush();
                }
            }
            Token::Stopword(word) => {
                if word == ITEM_SEPARATOR && !self.current_name.is_empty() {
                    self.flush();
                }
            }
            Token::Word(word) => self.current_name.push(word),
        }
    }

    /// Flushes the item in progress and returns everything emitted.
    pub fn finish(mut self) -> Vec<ParsedItem> {
        self.flush();
        if let Some(quantity) = self.pending_quantity {
            trace!(quantity, "Discarding quantity with no item name");
        }
        self.items
    }

    fn flush(&mut self) {
        if self.current_name.is_empty() {
            return;
        }

        let words = std::mem::take(&mut self.current_name);
        let quantity = self.pending_quantity.take().unwrap_or(1.0);
        let identifier = self.current_identifier.take();
        self.emit(words.iter().map(String::as_str), quantity, identifier);
    }

    fn emit<'w>(
        &mut self,
        words: impl Iterator<Item = &'w str>,
        quantity: f64,
        history_id: Option<String>,
    ) {
        let name = title_case(words);

        if name.is_empty() || self.config.is_stopword(&name) {
            trace!(name = %name, "Dropping empty or stopword item");
            return;
        }

        let Some(quantity) = Quantity::new(quantity) else {
            debug!(name = %name, quantity, "Dropping item with non-positive quantity");
            return;
        };

        self.items.push(ParsedItem {
            name,
            quantity,
            history_id,
        });
    }
}

/// Folds `tokens` left to right into parsed items.
///
/// ```rust
/// use basket_core::accumulator::accumulate;
/// use basket_core::tokenizer::Token;
/// use basket_core::ParserConfig;
///
/// let items = accumulate(
///     vec![Token::Word("rice".into()), Token::Quantity(2.0)],
///     &ParserConfig::default(),
/// );
/// assert_eq!(items[0].name, "Rice");
/// assert_eq!(items[0].quantity.value(), 2.0);
/// ```
pub fn accumulate(
    tokens: impl IntoIterator<Item = Token>,
    config: &ParserConfig,
) -> Vec<ParsedItem> {
    tokens
        .into_iter()
        .fold(Accumulator::new(config), |mut acc, token| {
            acc.feed(token);
            acc
        })
        .finish()
}

/// Capitalizes each non-empty word and joins with single spaces.
///
/// The first char is upper-cased, not title-cased: `ǆ` becomes `Ǆ` rather
/// than `ǅ`, since std has no titlecase mapping.
fn title_case<'w>(words: impl Iterator<Item = &'w str>) -> String {
    words
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
