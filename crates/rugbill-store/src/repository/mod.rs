//! # Repository Module
//!
//! Document storage behind a trait, so callers can swap the backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller (editor, batch command)                                        │
//! │       │                                                                 │
//! │       │  repo.list(&DocumentFilter::new().document_type(Consignment))  │
//! │       ▼                                                                 │
//! │  DocumentRepository (trait)                                            │
//! │  ├── insert(&self, document)                                           │
//! │  ├── get(&self, invoice_number)                                        │
//! │  ├── update(&self, document)                                           │
//! │  ├── delete(&self, invoice_number)                                     │
//! │  └── list(&self, filter)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryDocumentRepository (the only adapter shipped)                   │
//! │                                                                         │
//! │  Only raw documents are stored. Totals are recomputed by the engine.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod document;

pub use document::{DocumentFilter, DocumentRepository, MemoryDocumentRepository};
