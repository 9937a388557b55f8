//! # Store Error Types
//!
//! Error types for numbering and repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  StoreError (this module) ← sequence / repository failures             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← adds file context                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stderr message + non-zero exit                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::PoisonError;

use rugbill_core::DocumentType;
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A record with the same key already exists.
    ///
    /// ## When This Occurs
    /// - Inserting a document whose invoice number is already stored
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// The record has no key to store it under.
    #[error("Cannot store a document without {0}")]
    MissingKey(String),

    /// The counter for a document type cannot advance any further.
    #[error("Number sequence for {0} is exhausted")]
    SequenceExhausted(DocumentType),

    /// A thread panicked while holding the store lock.
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::LockPoisoned
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
