//! # Document Repository
//!
//! Stores raw invoice and consignment documents keyed by invoice number.

use std::sync::Mutex;

use chrono::NaiveDate;
use rugbill_core::{DocumentType, InvoiceDocument};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

const ENTITY: &str = "Document";

// =============================================================================
// Filter
// =============================================================================

/// Criteria for [`DocumentRepository::list`]. Unset criteria match
/// everything; set criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    pub document_type: Option<DocumentType>,

    /// Case-insensitive substring of the sold-to name.
    pub customer: Option<String>,

    /// Inclusive. Documents without a date never match a date bound.
    pub date_from: Option<NaiveDate>,

    /// Inclusive.
    pub date_to: Option<NaiveDate>,

    /// `Some(true)`: only documents with returned items.
    pub with_returns: Option<bool>,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = Some(document_type);
        self
    }

    pub fn customer(mut self, text: impl Into<String>) -> Self {
        self.customer = Some(text.into());
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn with_returns(mut self, with_returns: bool) -> Self {
        self.with_returns = Some(with_returns);
        self
    }

    /// Checks one document against every set criterion.
    pub fn matches(&self, document: &InvoiceDocument) -> bool {
        if let Some(wanted) = self.document_type {
            if document.document_type != wanted {
                return false;
            }
        }

        if let Some(ref text) = self.customer {
            let needle = text.trim().to_lowercase();
            if !document.sold_to.name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = document.date else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }

        if let Some(wanted) = self.with_returns {
            if document.has_returns() != wanted {
                return false;
            }
        }

        true
    }
}

// =============================================================================
// Repository Trait
// =============================================================================

/// Storage for raw documents, keyed by trimmed invoice number.
pub trait DocumentRepository: Send + Sync {
    /// Stores a new document. Blank or already-used numbers are rejected.
    fn insert(&self, document: InvoiceDocument) -> StoreResult<()>;

    fn get(&self, invoice_number: &str) -> StoreResult<Option<InvoiceDocument>>;

    /// Replaces the stored document with the same invoice number.
    fn update(&self, document: InvoiceDocument) -> StoreResult<()>;

    fn delete(&self, invoice_number: &str) -> StoreResult<()>;

    /// Matching documents in insertion order.
    fn list(&self, filter: &DocumentFilter) -> StoreResult<Vec<InvoiceDocument>>;
}

// =============================================================================
// In-Memory Repository
// =============================================================================

/// Thread-safe in-memory repository preserving insertion order.
#[derive(Debug, Default)]
pub struct MemoryDocumentRepository {
    documents: Mutex<Vec<InvoiceDocument>>,
}

impl MemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.documents.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn key(invoice_number: &str) -> &str {
    invoice_number.trim()
}

fn position(documents: &[InvoiceDocument], invoice_number: &str) -> Option<usize> {
    let wanted = key(invoice_number);
    documents
        .iter()
        .position(|doc| key(&doc.invoice_number) == wanted)
}

impl DocumentRepository for MemoryDocumentRepository {
    fn insert(&self, document: InvoiceDocument) -> StoreResult<()> {
        if key(&document.invoice_number).is_empty() {
            return Err(StoreError::MissingKey("an invoice number".to_string()));
        }

        let mut documents = self.documents.lock()?;
        if position(&documents, &document.invoice_number).is_some() {
            return Err(StoreError::duplicate(
                "invoice number",
                key(&document.invoice_number),
            ));
        }

        debug!(
            invoice_number = %document.invoice_number,
            document_type = %document.document_type,
            items = document.items.len(),
            "Inserting document"
        );
        documents.push(document);
        Ok(())
    }

    fn get(&self, invoice_number: &str) -> StoreResult<Option<InvoiceDocument>> {
        let documents = self.documents.lock()?;
        Ok(position(&documents, invoice_number).map(|i| documents[i].clone()))
    }

    fn update(&self, document: InvoiceDocument) -> StoreResult<()> {
        let mut documents = self.documents.lock()?;
        let index = position(&documents, &document.invoice_number)
            .ok_or_else(|| StoreError::not_found(ENTITY, key(&document.invoice_number)))?;

        debug!(invoice_number = %document.invoice_number, "Updating document");
        documents[index] = document;
        Ok(())
    }

    fn delete(&self, invoice_number: &str) -> StoreResult<()> {
        let mut documents = self.documents.lock()?;
        let index = position(&documents, invoice_number)
            .ok_or_else(|| StoreError::not_found(ENTITY, key(invoice_number)))?;

        debug!(invoice_number = %invoice_number, "Deleting document");
        documents.remove(index);
        Ok(())
    }

    fn list(&self, filter: &DocumentFilter) -> StoreResult<Vec<InvoiceDocument>> {
        let documents = self.documents.lock()?;
        let matched: Vec<InvoiceDocument> = documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect();

        debug!(count = matched.len(), "List returned documents");
        Ok(matched)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
