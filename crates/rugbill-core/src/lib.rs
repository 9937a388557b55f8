//! # rugbill-core: Invoice Calculation Engine
//!
//! This crate turns a rug invoice (line-item geometry plus a pricing mode)
//! into taxed totals. It is a set of pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Rugbill Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Callers: editor preview, validator, print template       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &InvoiceDocument                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ rugbill-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌──────────────┐  ┌────────────┐  ┌────────┐  │   │
//! │  │   │   types   │  │ calculations │  │ validation │  │ format │  │   │
//! │  │   │ LineItem  │  │ area, amount │  │  findings  │  │ $, ft² │  │   │
//! │  │   │ Document  │  │ totals       │  │            │  │        │  │   │
//! │  │   └───────────┘  └──────────────┘  └────────────┘  └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         rugbill-store (numbering + document repository)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Document, line item, pricing mode, calculation result
//! - [`calculations`] - Area, line amount and invoice totals
//! - [`validation`] - Advisory findings before a document is accepted
//! - [`format`] - Currency and square-footage display strings
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same document in, same totals out
//! 2. **Total Functions**: calculations never fail; validation is separate
//! 3. **Float Money**: amounts are `f64` and only rounded for display
//! 4. **Immutable Input**: the engine borrows documents, never mutates them
//!
//! ## Example Usage
//!
//! ```rust
//! use rugbill_core::{compute_invoice, format_currency, validate_document};
//! use rugbill_core::{Dimensions, DocumentType, InvoiceDocument, LineItem, PricingMode};
//!
//! let mut doc = InvoiceDocument::new(DocumentType::Consignment, PricingMode::RetailPerSqft);
//! doc.items.push(
//!     LineItem::new("HZ-1010", "Heriz 10x10")
//!         .with_dimensions(Dimensions::new(10, 0, 10, 0))
//!         .with_price_per_sq_ft(5.0),
//! );
//!
//! let totals = compute_invoice(&doc);
//! assert_eq!(totals.sales_tax, 0.0); // consignments are never taxed
//! assert_eq!(format_currency(totals.total_due), "$500.00");
//!
//! // Missing invoice number, date and customer
//! assert_eq!(validate_document(&doc).len(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculations;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculations::{compute_area, compute_invoice, compute_line_amount};
pub use error::{CoreError, ValidationError};
pub use format::{format_currency, format_dimensions, format_sqft};
pub use types::*;
pub use validation::validate_document;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax rate applied to retail invoices (6%).
///
/// Fixed for the business; not a per-document or per-call setting.
pub const SALES_TAX_RATE: f64 = 0.06;

/// Inches per foot, for feet-and-inches conversion.
pub const INCHES_PER_FOOT: f64 = 12.0;
