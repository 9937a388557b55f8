//! # Document Commands
//!
//! `preview` prints the itemized document with totals; `validate` checks one
//! or more files and reports through the exit status.

use std::io::Write;
use std::path::{Path, PathBuf};

use rugbill_core::validation::validate_discount_percentage;
use rugbill_core::{
    compute_invoice, format_currency, format_dimensions, format_sqft, validate_document,
    CalculationResult, InvoiceDocument, SALES_TAX_RATE,
};
use tracing::{info, warn};

use super::{load_document, Outcome};
use crate::config::BusinessConfig;
use crate::error::{CliError, CliResult};

// =============================================================================
// preview
// =============================================================================

/// Prints findings, itemized lines and totals for one document.
///
/// Findings do not stop the preview and do not change the exit status.
pub fn preview(path: &Path, business: &BusinessConfig, out: &mut dyn Write) -> CliResult<Outcome> {
    let document = load_document(path)?;
    let findings = validate_document(&document);
    let totals = compute_invoice(&document);

    write_header(business, out)?;
    write_summary(&document, out)?;

    if !findings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Findings:")?;
        for finding in &findings {
            writeln!(out, "  - {}", finding)?;
        }
    }

    if let Err(warning) = validate_discount_percentage(document.discount_percentage) {
        warn!(invoice_number = %document.invoice_number, %warning, "Unusual discount");
        writeln!(out)?;
        writeln!(out, "Warning: {}", warning)?;
    }

    writeln!(out)?;
    write_lines(&totals, out)?;
    writeln!(out)?;
    write_totals(&document, &totals, out)?;

    info!(
        invoice_number = %document.invoice_number,
        findings = findings.len(),
        total_due = totals.total_due,
        "Previewed document"
    );
    Ok(Outcome::Success)
}

fn write_header(business: &BusinessConfig, out: &mut dyn Write) -> CliResult<()> {
    if !business.name.trim().is_empty() {
        writeln!(out, "{}", business.name)?;
    }

    let contact: Vec<&str> = [business.address.as_str(), business.phone.as_str()]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if !contact.is_empty() {
        writeln!(out, "{}", contact.join(" | "))?;
    }
    if !business.name.trim().is_empty() || !contact.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

fn write_summary(document: &InvoiceDocument, out: &mut dyn Write) -> CliResult<()> {
    let number = match document.invoice_number.trim() {
        "" => "(unnumbered)",
        n => n,
    };
    let date = document
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "(no date)".to_string());

    writeln!(out, "{} {}", document.document_type, number)?;
    writeln!(out, "Date:     {}", date)?;
    writeln!(out, "Sold to:  {}", document.sold_to.name)?;
    writeln!(out, "Pricing:  {}", document.pricing_mode)?;
    if let Some(notes) = document.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        writeln!(out, "Notes:    {}", notes)?;
    }
    Ok(())
}

fn write_lines(totals: &CalculationResult, out: &mut dyn Write) -> CliResult<()> {
    writeln!(
        out,
        "{:>3}  {:<12} {:<24} {:<18} {:>10} {:>14}",
        "#", "SKU", "Description", "Dimensions", "Sq ft", "Amount"
    )?;

    for (index, line) in totals.items.iter().enumerate() {
        let item = &line.item;
        write!(
            out,
            "{:>3}  {:<12} {:<24} {:<18} {:>10} {:>14}",
            index + 1,
            item.sku,
            item.description,
            format_dimensions(&item.dimensions, item.shape),
            format_sqft(line.area),
            format_currency(line.amount)
        )?;

        if item.returned {
            write!(out, "  RETURNED")?;
        }
        writeln!(out)?;

        if let Some(note) = item.return_note.as_deref().filter(|n| !n.trim().is_empty()) {
            writeln!(out, "     Return note: {}", note)?;
        }
    }

    writeln!(
        out,
        "{:>3}  {:<12} {:<24} {:<18} {:>10}",
        "",
        "",
        "",
        "Total area",
        format_sqft(totals.total_area())
    )?;
    Ok(())
}

fn write_totals(
    document: &InvoiceDocument,
    totals: &CalculationResult,
    out: &mut dyn Write,
) -> CliResult<()> {
    writeln!(out, "{:<20}{:>14}", "Subtotal:", format_currency(totals.subtotal))?;

    if totals.discount != 0.0 {
        let label = format!(
            "Discount ({}%):",
            percent(document.discount_percentage.unwrap_or_default())
        );
        writeln!(out, "{:<20}{:>14}", label, format_currency(-totals.discount))?;
        writeln!(
            out,
            "{:<20}{:>14}",
            "After discount:",
            format_currency(totals.subtotal_after_discount)
        )?;
    }

    let tax_label = format!("Sales tax ({}%):", percent(SALES_TAX_RATE * 100.0));
    writeln!(out, "{:<20}{:>14}", tax_label, format_currency(totals.sales_tax))?;
    writeln!(out, "{:<20}{:>14}", "Total due:", format_currency(totals.total_due))?;
    Ok(())
}

/// `10.0` → `10`, `7.25` → `7.25`.
fn percent(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

// =============================================================================
// validate
// =============================================================================

/// Checks every file and prints its findings.
///
/// Unreadable or malformed files count as failures but do not stop the run.
pub fn validate(paths: &[PathBuf], out: &mut dyn Write) -> CliResult<Outcome> {
    let mut failed = 0usize;

    for path in paths {
        let findings = match load_document(path) {
            Ok(document) => validate_document(&document),
            Err(err @ (CliError::Read { .. } | CliError::Json { .. })) => {
                warn!(path = %path.display(), "Skipping unreadable document");
                vec![err.to_string()]
            }
            Err(err) => return Err(err),
        };

        if findings.is_empty() {
            writeln!(out, "{}: OK", path.display())?;
            continue;
        }

        failed += 1;
        let noun = if findings.len() == 1 { "finding" } else { "findings" };
        writeln!(out, "{}: {} {}", path.display(), findings.len(), noun)?;
        for finding in &findings {
            writeln!(out, "  - {}", finding)?;
        }
    }

    info!(files = paths.len(), failed, "Validation finished");

    Ok(if failed == 0 {
        Outcome::Success
    } else {
        Outcome::Findings
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
