//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                         │
//! │  ├── CoreError        - Cart rule violations, bad parser config        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  basket-service errors (separate crate)                                 │
//! │  └── ServiceError     - Config I/O, lookups, wrapped CoreError         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → HTTP layer         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing and reconciliation never produce these errors: a request line
//! always yields an answer, possibly empty. Errors only appear when merge
//! operations are applied to a cart or when configuration is rejected.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cart entry referenced by id does not exist.
    ///
    /// ## When This Occurs
    /// - An `IncrementQuantity` operation targets an entry removed since
    ///   the snapshot was taken
    /// - A manual update/remove names an unknown id
    #[error("Cart entry not found: {0}")]
    EntryNotFound(String),

    /// Cart has exceeded maximum allowed entries.
    #[error("Cart cannot have more than {max} entries")]
    CartTooLarge { max: usize },

    /// Entry quantity exceeds maximum allowed.
    #[error("Quantity {requested} for {name} exceeds maximum allowed ({max})")]
    QuantityTooLarge {
        name: String,
        requested: f64,
        max: f64,
    },

    /// Parser configuration is unusable.
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for manual cart edits and history writes, before any state
/// is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
