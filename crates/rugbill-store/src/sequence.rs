//! # Invoice Number Sequence
//!
//! Hands out document numbers such as `INV-00042` and `CON-00007`.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Numbering is shared state. It lives in an object the caller owns and  │
//! │  passes in, so tests and previews never touch a process-wide counter.  │
//! │                                                                         │
//! │  caller ──► &dyn InvoiceSequence ──► next_number(Invoice)              │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                               "INV-00001", "INV-00002", ...             │
//! │                                                                         │
//! │  Invoices and consignments count independently.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use rugbill_core::{DocumentType, InvoiceDocument};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Numbering Scheme
// =============================================================================

/// How numbers are rendered: `{prefix}-{counter:0width$}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingScheme {
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,

    #[serde(default = "default_consignment_prefix")]
    pub consignment_prefix: String,

    /// Minimum digits; shorter counters are zero-padded.
    #[serde(default = "default_width")]
    pub width: usize,

    /// First counter value handed out.
    #[serde(default = "default_start")]
    pub start: u64,
}

fn default_invoice_prefix() -> String {
    "INV".to_string()
}

fn default_consignment_prefix() -> String {
    "CON".to_string()
}

fn default_width() -> usize {
    5
}

fn default_start() -> u64 {
    1
}

impl Default for NumberingScheme {
    fn default() -> Self {
        NumberingScheme {
            invoice_prefix: default_invoice_prefix(),
            consignment_prefix: default_consignment_prefix(),
            width: default_width(),
            start: default_start(),
        }
    }
}

impl NumberingScheme {
    pub fn prefix(&self, document_type: DocumentType) -> &str {
        match document_type {
            DocumentType::Invoice => &self.invoice_prefix,
            DocumentType::Consignment => &self.consignment_prefix,
        }
    }

    /// Renders a counter value as a document number.
    pub fn render(&self, document_type: DocumentType, counter: u64) -> String {
        format!(
            "{}-{:0width$}",
            self.prefix(document_type),
            counter,
            width = self.width
        )
    }

    /// Extracts the counter from a number produced by this scheme.
    ///
    /// Returns `None` for numbers with a different prefix or a non-numeric
    /// tail (hand-typed numbers are allowed, they just don't count).
    pub fn parse(&self, document_type: DocumentType, number: &str) -> Option<u64> {
        number
            .trim()
            .strip_prefix(self.prefix(document_type))?
            .strip_prefix('-')?
            .parse()
            .ok()
    }

    /// Finds the document type whose prefix `number` carries, with its
    /// counter. The number decides the counter, not the document it sits on.
    pub fn classify(&self, number: &str) -> Option<(DocumentType, u64)> {
        [DocumentType::Invoice, DocumentType::Consignment]
            .into_iter()
            .find_map(|document_type| {
                self.parse(document_type, number)
                    .map(|counter| (document_type, counter))
            })
    }
}

// =============================================================================
// Sequence Trait
// =============================================================================

/// Source of document numbers.
pub trait InvoiceSequence: Send + Sync {
    /// Issues the next number for the document type.
    fn next_number(&self, document_type: DocumentType) -> StoreResult<String>;

    /// Counter value the next call to `next_number` will use.
    fn peek(&self, document_type: DocumentType) -> StoreResult<u64>;

    /// Records an externally assigned number so it is never issued again.
    ///
    /// The counter bumped is the one whose prefix the number carries.
    fn observe(&self, number: &str) -> StoreResult<()>;
}

/// Fills in a blank invoice number from the sequence.
///
/// Returns `true` when a number was assigned; an existing number is kept.
pub fn assign_number(
    document: &mut InvoiceDocument,
    sequence: &dyn InvoiceSequence,
) -> StoreResult<bool> {
    if !document.invoice_number.trim().is_empty() {
        return Ok(false);
    }

    document.invoice_number = sequence.next_number(document.document_type)?;
    Ok(true)
}

// =============================================================================
// In-Memory Sequence
// =============================================================================

/// Thread-safe in-memory sequence with one counter per document type.
#[derive(Debug)]
pub struct MemorySequence {
    scheme: NumberingScheme,
    counters: Mutex<HashMap<DocumentType, u64>>,
}

impl MemorySequence {
    pub fn new(scheme: NumberingScheme) -> Self {
        MemorySequence {
            scheme,
            counters: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySequence {
    fn default() -> Self {
        Self::new(NumberingScheme::default())
    }
}

impl InvoiceSequence for MemorySequence {
    fn next_number(&self, document_type: DocumentType) -> StoreResult<String> {
        let mut counters = self.counters.lock()?;
        let counter = counters.entry(document_type).or_insert(self.scheme.start);

        let issued = *counter;
        *counter = issued
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted(document_type))?;

        let number = self.scheme.render(document_type, issued);
        debug!(document_type = %document_type, number = %number, "Issued document number");
        Ok(number)
    }

    fn peek(&self, document_type: DocumentType) -> StoreResult<u64> {
        let counters = self.counters.lock()?;
        Ok(counters
            .get(&document_type)
            .copied()
            .unwrap_or(self.scheme.start))
    }

    fn observe(&self, number: &str) -> StoreResult<()> {
        let Some((document_type, seen)) = self.scheme.classify(number) else {
            return Ok(());
        };

        let mut counters = self.counters.lock()?;
        let counter = counters.entry(document_type).or_insert(self.scheme.start);
        if seen >= *counter {
            *counter = seen
                .checked_add(1)
                .ok_or(StoreError::SequenceExhausted(document_type))?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
