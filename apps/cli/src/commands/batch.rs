//! # Batch Command
//!
//! Loads a directory of documents into a repository and lists the ones that
//! match a filter, with each total due and a grand total.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  *.json (sorted by file name)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. observe numbered documents  ──► MemorySequence skips their numbers │
//! │  2. assign_number() to blanks   ──► INV-00001, CON-00001, ...          │
//! │  3. insert into MemoryDocumentRepository (duplicates are an error)     │
//! │  4. list(&DocumentFilter) ──► compute_invoice() per document           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use rugbill_core::{compute_invoice, format_currency, InvoiceDocument};
use rugbill_store::{
    assign_number, DocumentFilter, DocumentRepository, InvoiceSequence,
    MemoryDocumentRepository, MemorySequence, NumberingScheme,
};
use tracing::info;

use super::{load_document, Outcome};
use crate::error::{CliError, CliResult};

/// Paths of the `*.json` files directly inside `dir`, sorted.
pub fn document_paths(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CliError::read(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CliError::read(dir, e))?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Loads every document in `dir` into a fresh repository, numbering the
/// ones that have no invoice number yet.
pub fn load_repository(
    dir: &Path,
    scheme: &NumberingScheme,
) -> CliResult<MemoryDocumentRepository> {
    let documents = document_paths(dir)?
        .iter()
        .map(|path| load_document(path))
        .collect::<CliResult<Vec<InvoiceDocument>>>()?;

    let sequence = MemorySequence::new(scheme.clone());
    for document in &documents {
        sequence.observe(&document.invoice_number)?;
    }

    let repository = MemoryDocumentRepository::new();
    let mut assigned = 0usize;
    for mut document in documents {
        if assign_number(&mut document, &sequence)? {
            assigned += 1;
        }
        repository.insert(document)?;
    }

    info!(
        dir = %dir.display(),
        documents = repository.len()?,
        assigned,
        "Loaded document batch"
    );
    Ok(repository)
}

/// Prints one row per matching document and the grand total.
pub fn batch(
    dir: &Path,
    filter: &DocumentFilter,
    scheme: &NumberingScheme,
    out: &mut dyn Write,
) -> CliResult<Outcome> {
    let repository = load_repository(dir, scheme)?;
    let documents = repository.list(filter)?;

    writeln!(
        out,
        "{:<14} {:<12} {:<10} {:<28} {:>14}",
        "Number", "Type", "Date", "Sold to", "Total due"
    )?;

    let mut grand_total = 0.0;
    for document in &documents {
        let totals = compute_invoice(document);
        grand_total += totals.total_due;

        let date = document.date.map(|d| d.to_string()).unwrap_or_default();
        let returns = if document.has_returns() { "  (returns)" } else { "" };
        writeln!(
            out,
            "{:<14} {:<12} {:<10} {:<28} {:>14}{}",
            document.invoice_number,
            document.document_type,
            date,
            document.sold_to.name,
            format_currency(totals.total_due),
            returns
        )?;
    }

    let noun = if documents.len() == 1 { "document" } else { "documents" };
    writeln!(out)?;
    writeln!(
        out,
        "{:<67} {:>14}",
        format!("{} {}", documents.len(), noun),
        format_currency(grand_total)
    )?;

    Ok(Outcome::Success)
}
