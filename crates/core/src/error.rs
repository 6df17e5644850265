//! Domain and hydration error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic input failures. Infrastructure concerns
/// (database, schema introspection) belong to the infra crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. negative database id).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Failure while turning a flattened row into a typed structure.
///
/// These indicate that a row does not honour the select-list contract
/// (a mandatory column is missing or carries an unexpected type).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HydrationError {
    /// A mandatory column was absent from the row or was null.
    #[error("missing field `{field}` for `{entity}`")]
    MissingField { entity: String, field: String },

    /// A column carried a value of the wrong type.
    #[error("field `{field}` of `{entity}` expected {expected}, found {found}")]
    TypeMismatch {
        entity: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A mandatory joined entity produced no row.
    #[error("mandatory entity `{0}` is absent from the row")]
    MissingEntity(String),

    /// A decoded value was rejected by a domain constructor.
    #[error("invalid value for `{entity}`: {source}")]
    Invalid {
        entity: String,
        #[source]
        source: DomainError,
    },
}
