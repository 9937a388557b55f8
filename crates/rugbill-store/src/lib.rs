//! # rugbill-store: Numbering and Document Storage
//!
//! Shared state that the pure engine in `rugbill-core` stays out of:
//! the invoice number sequence and the document repository.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Rugbill Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 rugbill CLI (apps/cli)                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ rugbill-store (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐          ┌──────────────────────────┐   │   │
//! │  │   │    sequence      │          │       repository         │   │   │
//! │  │   │ InvoiceSequence  │          │   DocumentRepository     │   │   │
//! │  │   │ MemorySequence   │          │ MemoryDocumentRepository │   │   │
//! │  │   └──────────────────┘          └──────────────────────────┘   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                rugbill-core (types, engine)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use rugbill_core::{DocumentType, InvoiceDocument, PricingMode};
//! use rugbill_store::{assign_number, DocumentFilter, DocumentRepository};
//! use rugbill_store::{MemoryDocumentRepository, MemorySequence};
//!
//! let sequence = MemorySequence::default();
//! let repo = MemoryDocumentRepository::new();
//!
//! let mut doc = InvoiceDocument::new(DocumentType::Invoice, PricingMode::RetailPerRug);
//! assign_number(&mut doc, &sequence).unwrap();
//! assert_eq!(doc.invoice_number, "INV-00001");
//!
//! repo.insert(doc).unwrap();
//! assert_eq!(repo.list(&DocumentFilter::new()).unwrap().len(), 1);
//! ```

pub mod error;
pub mod repository;
pub mod sequence;

pub use error::{StoreError, StoreResult};
pub use repository::{DocumentFilter, DocumentRepository, MemoryDocumentRepository};
pub use sequence::{assign_number, InvoiceSequence, MemorySequence, NumberingScheme};
