//! # basket-service: Per-User Carts Around basket-core
//!
//! Holds each user's cart and request history in memory, loads the parser
//! and limit configuration, and sets up logging for the host binary.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   BasketConfig::load() ──► CartBook::new(config)                        │
//! │                                   │                                     │
//! │          submit_request(user, raw)│  add/update/remove/clear entries    │
//! │                                   ▼                                     │
//! │                         basket_core::{parse, reconcile,                 │
//! │                                       apply_operations}                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use basket_service::{BasketConfig, CartBook};
//!
//! let book = CartBook::new(BasketConfig::default());
//! book.submit_request("alice", "rice 2 and milk").unwrap();
//! book.submit_request("alice", "rice-1").unwrap();
//!
//! let summary = book.summary("alice");
//! assert_eq!(summary.unique_products, 2);
//! assert_eq!(summary.total_items, 4.0);
//! ```

pub mod book;
pub mod config;
pub mod error;

pub use book::{CartBook, EntryUpdate, NewEntry, RequestOutcome};
pub use config::BasketConfig;
pub use error::{ErrorCode, ServiceError, ServiceResult};

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,basket_core=debug,basket_service=debug";

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG`. Calling it twice is harmless.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
