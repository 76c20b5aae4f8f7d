//! Domain error model.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a recoverable, user-facing condition; none is fatal to
/// process state. Infrastructure failures (storage, file IO) belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or an input value is malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A product code collides with a different product's identity.
    #[error("duplicate product code: {0}")]
    DuplicateCode(String),

    /// A count already exists for the same store on the same date.
    #[error("a count already exists for store \"{store}\" on {date}")]
    DuplicateStoreDate { store: String, date: NaiveDate },

    /// An entry references a product no longer in the catalog.
    ///
    /// Non-fatal: callers degrade to a fallback display value.
    #[error("referenced product not found: {0}")]
    ReferenceNotFound(String),

    /// A requested record was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Deletion authorization failed (wrong shared secret).
    #[error("permission denied")]
    PermissionDenied,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_code(code: impl Into<String>) -> Self {
        Self::DuplicateCode(code.into())
    }

    pub fn duplicate_store_date(store: impl Into<String>, date: NaiveDate) -> Self {
        Self::DuplicateStoreDate {
            store: store.into(),
            date,
        }
    }

    pub fn reference_not_found(code: impl Into<String>) -> Self {
        Self::ReferenceNotFound(code.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
