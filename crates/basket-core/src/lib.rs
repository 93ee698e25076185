//! # basket-core: Free-Text Shopping Requests → Cart Operations
//!
//! This crate turns a line like `"Rice 1/2, Milk 12345 and 2 Bread"` into
//! structured items and reconciles them against a user's cart. It is pure:
//! no I/O, no shared state, safe to call from any number of requests at once.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Basket Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Web client  (cart page, history page)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      basket-service  (config, tracing, per-user cart book)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   raw text ─► tokenizer ─► accumulator ─► merge ─► operations   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tokenizer`] - Normalization and token classification
//! - [`accumulator`] - Token stream → [`ParsedItem`]s
//! - [`merge`] - [`ParsedItem`]s + cart snapshot → [`MergeOperation`]s
//! - [`config`] - Stopwords and identifier bounds
//! - [`types`] - Domain types
//! - [`quantity`] / [`money`] - Positive amounts and integer money
//! - [`summary`] - Cart totals
//! - [`validation`] - Checks for manual cart edits
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{parse, reconcile, MergeOperation, ParserConfig};
//!
//! let config = ParserConfig::default();
//! let raw = "bro i want 1/2 rice and 2 bread";
//! let items = parse(raw, &config);
//!
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].name, "Rice");
//! assert_eq!(items[0].quantity.value(), 0.5);
//!
//! let result = reconcile(raw, &items, &[]);
//! assert!(matches!(result.operations[1], MergeOperation::Create { .. }));
//! assert_eq!(result.history_log, raw);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accumulator;
pub mod config;
pub mod error;
pub mod merge;
pub mod money;
pub mod quantity;
pub mod summary;
pub mod tokenizer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::ParserConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use merge::{apply_operations, reconcile, Reconciliation};
pub use money::Money;
pub use quantity::Quantity;
pub use summary::CartSummary;
pub use types::*;

use tracing::debug;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum number of entries in one cart.
pub const MAX_CART_ENTRIES: usize = 100;

/// Default maximum quantity of a single entry.
///
/// Catches typos such as a 9-digit catalog number read as an amount.
pub const MAX_ENTRY_QUANTITY: f64 = 999.0;

// =============================================================================
// Entry Point
// =============================================================================

/// Parses one request line into items. Never fails; may return nothing.
pub fn parse(raw: &str, config: &ParserConfig) -> Vec<ParsedItem> {
    let tokens = tokenizer::Tokenizer::new(config).tokenize(raw);
    let items = accumulator::accumulate(tokens, config);
    debug!(input = %raw, count = items.len(), "Parsed request");
    items
}
