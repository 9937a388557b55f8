//! # Error Types
//!
//! Domain-specific error types for rugbill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rugbill-core errors (this file)                                       │
//! │  ├── CoreError        - Parsing wire values (modes, document types)    │
//! │  └── ValidationError  - Advisory findings on a document                │
//! │                                                                         │
//! │  rugbill-store errors (separate crate)                                 │
//! │  └── StoreError       - Sequence / repository failures                 │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation functions never return errors. A malformed document
//! still computes; its problems surface as [`ValidationError`] findings.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pricing mode string is not one of the four known modes.
    #[error("Unknown pricing mode: '{0}'. Valid options: retail-per-rug, wholesale-per-rug, retail-per-sqft, wholesale-per-sqft")]
    UnknownPricingMode(String),

    /// Document type string is neither INVOICE nor CONSIGNMENT.
    #[error("Unknown document type: '{0}'. Valid options: INVOICE, CONSIGNMENT")]
    UnknownDocumentType(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single validation finding.
///
/// The `Display` output of each variant is the human-readable string the
/// editor shows next to the form, e.g. `"Item 2: SKU is required"`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field is negative or not a number.
    #[error("{field} must be a non-negative number")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// A collection that needs at least one entry is empty.
    #[error("At least one {entry} is required")]
    Empty { entry: String },

    /// A finding scoped to one line item (1-based position).
    #[error("Item {position}: {finding}")]
    Item {
        position: usize,
        finding: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Creates a Required finding.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Scopes this finding to the line item at `position` (1-based).
    pub fn at_item(self, position: usize) -> Self {
        ValidationError::Item {
            position,
            finding: Box::new(self),
        }
    }
}
