//! # Validation Module
//!
//! Completeness checks run before a document is accepted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Document Validation                                │
//! │                                                                         │
//! │  validate_document(doc)                                                │
//! │  ├── invoice number present                                            │
//! │  ├── date present                                                      │
//! │  ├── sold-to name present                                              │
//! │  ├── at least one item                                                 │
//! │  └── per item:  SKU, description, price for the pricing mode           │
//! │                                                                         │
//! │  Every check runs; findings accumulate in order. Nothing is mutated    │
//! │  and nothing is rejected here: the caller decides what to do.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rugbill_core::validation::validate_document;
//! use rugbill_core::{DocumentType, InvoiceDocument, PricingMode};
//!
//! let doc = InvoiceDocument::new(DocumentType::Invoice, PricingMode::RetailPerRug);
//! let findings = validate_document(&doc);
//! assert_eq!(findings[0], "Invoice number is required");
//! ```

use crate::error::ValidationError;
use crate::types::{InvoiceDocument, LineItem, PricingMode};

/// Result type for single-field validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Document Validators
// =============================================================================

/// Validates a document and returns its findings as display strings.
///
/// An empty vector means the document is complete.
pub fn validate_document(document: &InvoiceDocument) -> Vec<String> {
    document_findings(document)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Typed form of [`validate_document`].
pub fn document_findings(document: &InvoiceDocument) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    collect(&mut findings, validate_invoice_number(&document.invoice_number));

    if document.date.is_none() {
        findings.push(ValidationError::required("Date"));
    }

    collect(&mut findings, validate_sold_to_name(&document.sold_to.name));

    if document.items.is_empty() {
        findings.push(ValidationError::Empty {
            entry: "item".to_string(),
        });
    }

    for (index, item) in document.items.iter().enumerate() {
        findings.extend(
            item_findings(item, document.pricing_mode)
                .into_iter()
                .map(|finding| finding.at_item(index + 1)),
        );
    }

    findings
}

/// Findings for one line item, unscoped.
pub fn item_findings(item: &LineItem, mode: PricingMode) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    collect(&mut findings, validate_sku(&item.sku));
    collect(&mut findings, validate_description(&item.description));

    let price = if mode.is_per_sqft() {
        validate_price("Price per sq ft", item.price_per_sq_ft)
    } else {
        validate_price("Fixed price", item.fixed_price)
    };
    collect(&mut findings, price);

    findings
}

fn collect(findings: &mut Vec<ValidationError>, result: ValidationResult<()>) {
    if let Err(finding) = result {
        findings.push(finding);
    }
}

// =============================================================================
// Field Validators
// =============================================================================

fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Invoice number must be non-blank.
pub fn validate_invoice_number(number: &str) -> ValidationResult<()> {
    require_text("Invoice number", number)
}

/// Customer name must be non-blank.
pub fn validate_sold_to_name(name: &str) -> ValidationResult<()> {
    require_text("Sold to name", name)
}

/// SKU must be non-blank.
///
/// ## Example
/// ```rust
/// use rugbill_core::validation::validate_sku;
///
/// assert!(validate_sku("HZ-0812").is_ok());
/// assert!(validate_sku("   ").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    require_text("SKU", sku)
}

/// Description must be non-blank.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    require_text("Description", description)
}

/// A price must be present and `>= 0`. NaN fails.
pub fn validate_price(field: &str, price: Option<f64>) -> ValidationResult<()> {
    match price {
        None => Err(ValidationError::required(field)),
        Some(value) if value >= 0.0 => Ok(()),
        Some(_) => Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        }),
    }
}

/// Discount, when given, must lie in `0..=100`.
///
/// Not part of [`validate_document`]; callers use it to warn about
/// percentages the editor should not have produced.
pub fn validate_discount_percentage(discount: Option<f64>) -> ValidationResult<()> {
    match discount {
        Some(pct) if !(0.0..=100.0).contains(&pct) => Err(ValidationError::OutOfRange {
            field: "Discount percentage".to_string(),
            min: 0.0,
            max: 100.0,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, DocumentType, Party};
    use chrono::NaiveDate;

    fn complete_document(mode: PricingMode) -> InvoiceDocument {
        let mut doc = InvoiceDocument::new(DocumentType::Invoice, mode);
        doc.invoice_number = "INV-00001".to_string();
        doc.date = NaiveDate::from_ymd_opt(2024, 5, 2);
        doc.sold_to = Party::named("Marlow & Finch");
        doc.items.push(
            LineItem::new("KZ-58", "Kazak 5x8")
                .with_dimensions(Dimensions::new(5, 0, 8, 0))
                .with_price_per_sq_ft(18.0)
                .with_fixed_price(720.0),
        );
        doc
    }

    #[test]
    fn test_complete_document_has_no_findings() {
        for mode in PricingMode::ALL {
            assert!(validate_document(&complete_document(mode)).is_empty());
        }
    }

    #[test]
    fn test_empty_document_reports_header_fields_in_order() {
        let doc = InvoiceDocument::new(DocumentType::Invoice, PricingMode::RetailPerRug);
        assert_eq!(
            validate_document(&doc),
            vec![
                "Invoice number is required",
                "Date is required",
                "Sold to name is required",
                "At least one item is required",
            ]
        );
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let mut doc = complete_document(PricingMode::RetailPerRug);
        doc.invoice_number = "   ".to_string();
        doc.sold_to.name = "\t".to_string();
        assert_eq!(
            validate_document(&doc),
            vec!["Invoice number is required", "Sold to name is required"]
        );
    }

    #[test]
    fn test_missing_date_and_sku_are_both_reported() {
        let mut doc = complete_document(PricingMode::RetailPerRug);
        doc.date = None;
        doc.items[0].sku = String::new();

        let findings = validate_document(&doc);

        assert!(findings.len() >= 2);
        assert!(findings.iter().any(|f| f.contains("Date")));
        assert!(findings.iter().any(|f| f.contains("SKU") && f.contains("Item 1")));
    }

    #[test]
    fn test_each_item_is_labelled_by_position() {
        let mut doc = complete_document(PricingMode::RetailPerRug);
        doc.items.push(LineItem::new("", "No sku").with_fixed_price(10.0));
        doc.items.push(LineItem::new("RD-6", "").with_fixed_price(10.0));

        assert_eq!(
            validate_document(&doc),
            vec!["Item 2: SKU is required", "Item 3: Description is required"]
        );
    }

    #[test]
    fn test_price_field_follows_pricing_mode() {
        let mut doc = complete_document(PricingMode::RetailPerSqft);
        doc.items[0].price_per_sq_ft = None;
        assert_eq!(
            validate_document(&doc),
            vec!["Item 1: Price per sq ft is required"]
        );

        // The fixed price is irrelevant in a per-sqft mode
        doc.items[0].price_per_sq_ft = Some(4.0);
        doc.items[0].fixed_price = None;
        assert!(validate_document(&doc).is_empty());

        doc.pricing_mode = PricingMode::WholesalePerRug;
        assert_eq!(validate_document(&doc), vec!["Item 1: Fixed price is required"]);
    }

    #[test]
    fn test_negative_and_nan_prices() {
        assert!(validate_price("Fixed price", Some(0.0)).is_ok());
        assert_eq!(
            validate_price("Fixed price", Some(-1.0)).unwrap_err().to_string(),
            "Fixed price must be a non-negative number"
        );
        assert!(validate_price("Fixed price", Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let doc = InvoiceDocument::new(DocumentType::Consignment, PricingMode::WholesalePerSqft);
        let before = doc.clone();
        let _ = validate_document(&doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_validate_discount_percentage() {
        assert!(validate_discount_percentage(None).is_ok());
        assert!(validate_discount_percentage(Some(0.0)).is_ok());
        assert!(validate_discount_percentage(Some(100.0)).is_ok());
        assert!(validate_discount_percentage(Some(-5.0)).is_err());
        assert!(validate_discount_percentage(Some(150.0)).is_err());
    }
}
