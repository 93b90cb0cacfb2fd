//! Error types for the Atrium domain layer.
//!
//! This module defines a small hierarchy of error types:
//!
//! - [`DomainError`] - Pagination, identifier and argument errors
//! - [`StorageError`] - Registry and manifest errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Domain Errors
// =============================================================================

/// Request-level errors raised while resolving a query.
///
/// Every variant is surfaced to the GraphQL caller as an entry in
/// the `errors` list; none of them is recovered from silently.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A non-empty `after`/`before` cursor does not identify a record
    /// of the collection being paginated.
    #[error("Invalid cursor for {collection}: {cursor}")]
    InvalidCursor {
        /// Collection tag the cursor was checked against.
        collection: String,
        /// The cursor as supplied by the caller.
        cursor: String,
    },

    /// Both `first` and `last` were supplied and the pager rejects the combination.
    #[error("Conflicting pagination arguments: `first` and `last` cannot be combined")]
    ConflictingArguments,

    /// A pagination or field argument is out of range.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name as it appears in the schema.
        name: &'static str,
        /// Human readable reason.
        reason: String,
    },

    /// A Relay global ID could not be decoded or has the wrong type.
    #[error("Invalid ID: {0}")]
    InvalidGlobalId(String),

    /// Registry operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl DomainError {
    /// Stable machine-readable code, exposed as `extensions.code` in GraphQL errors.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidCursor { .. } => "INVALID_CURSOR",
            DomainError::ConflictingArguments => "CONFLICTING_ARGUMENTS",
            DomainError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            DomainError::InvalidGlobalId(_) => "INVALID_ID",
            DomainError::Storage(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Registry and manifest errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A handle (or user id) is already registered.
    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    /// Requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Manifest could not be read.
    #[error("Manifest I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest (or an `extra` value) could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::SerializationError(e.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
