//! # Service Error Type
//!
//! Unified error type for cart book operations and config loading.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Basket                                 │
//! │                                                                         │
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartBook method ── Result<T, ServiceError>                             │
//! │       │                                                                 │
//! │       ├── ValidationError ──► CoreError::Validation ──┐                 │
//! │       ├── CoreError (limits, unknown entry) ──────────┼─► ServiceError  │
//! │       └── config I/O / TOML ──────────────────────────┘        │        │
//! │                                                                 ▼        │
//! │                                            ErrorCode ──► HTTP status     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use basket_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Domain rule violation or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No config path given and no platform config directory available.
    #[error("No config path available")]
    NoConfigPath,

    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

/// Machine-readable error category for callers.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Cart entry not found: …" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Cart limits exceeded (422)
    LimitExceeded,

    /// Configuration problem (500)
    Config,
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Core(CoreError::EntryNotFound(_)) => ErrorCode::NotFound,
            ServiceError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            ServiceError::Core(
                CoreError::CartTooLarge { .. } | CoreError::QuantityTooLarge { .. },
            ) => ErrorCode::LimitExceeded,
            ServiceError::Core(CoreError::InvalidConfig(_))
            | ServiceError::InvalidConfig(_)
            | ServiceError::NoConfigPath
            | ServiceError::Io(_)
            | ServiceError::ConfigParse(_)
            | ServiceError::ConfigSerialize(_) => ErrorCode::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = ServiceError::from(CoreError::EntryNotFound("x".into()));
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Cart entry not found: x");

        let err = ServiceError::from(ValidationError::Required {
            field: "query".into(),
        });
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let err = ServiceError::from(CoreError::CartTooLarge { max: 3 });
        assert_eq!(err.code(), ErrorCode::LimitExceeded);
    }

    #[test]
    fn test_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::NotFound).unwrap(),
            "\"NOT_FOUND\""
        );
    }
}
