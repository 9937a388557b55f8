//! # Calculations Module
//!
//! The invoice calculation engine: geometry, line amounts and totals.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     compute_invoice(document)                           │
//! │                                                                         │
//! │  for each item (document order)                                         │
//! │    compute_area(width, length, shape) ──► area                          │
//! │    compute_line_amount(item, mode)    ──► amount                        │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │  subtotal                = Σ amount                                     │
//! │  discount                = subtotal × pct / 100   (retail, pct set)     │
//! │  subtotal_after_discount = subtotal − discount                          │
//! │  sales_tax               = after × 6%   (retail, not consignment)       │
//! │  total_due               = subtotal_after_discount + sales_tax          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The steps run in exactly this order. Every function here is total: bad
//! input (NaN, negatives, missing prices) produces a number, never an error.
//! Use [`crate::validation`] to find out whether a document is sane.
//!
//! ## Example
//! ```rust
//! use rugbill_core::{compute_invoice, Dimensions, DocumentType, InvoiceDocument, LineItem, PricingMode};
//!
//! let mut doc = InvoiceDocument::new(DocumentType::Invoice, PricingMode::RetailPerSqft);
//! doc.discount_percentage = Some(10.0);
//! doc.items.push(
//!     LineItem::new("HZ-1", "Heriz")
//!         .with_dimensions(Dimensions::new(10, 0, 10, 0))
//!         .with_price_per_sq_ft(5.0),
//! );
//!
//! let result = compute_invoice(&doc);
//! assert_eq!(result.subtotal, 500.0);
//! assert_eq!(result.discount, 50.0);
//! assert_eq!(result.total_due, 477.0);
//! ```

use std::f64::consts::PI;

use tracing::trace;

use crate::types::{
    CalculationResult, ComputedLineItem, DocumentType, InvoiceDocument, LineItem, PricingMode,
    RugShape,
};
use crate::{INCHES_PER_FOOT, SALES_TAX_RATE};

// =============================================================================
// Area Calculator
// =============================================================================

/// Converts feet and inches to decimal feet (`feet + inches / 12`).
#[inline]
pub fn feet_to_decimal(feet: i32, inches: i32) -> f64 {
    f64::from(feet) + f64::from(inches) / INCHES_PER_FOOT
}

/// Square footage of a rug.
///
/// - Rectangle: width × length.
/// - Round: the width is the diameter, area = π × (diameter / 2)².
///   The length fields are ignored entirely.
///
/// ## Example
/// ```rust
/// use rugbill_core::{compute_area, RugShape};
///
/// assert_eq!(compute_area(5, 6, 8, 0, RugShape::Rectangle), 44.0);
///
/// // 8' round: length is not consulted
/// let a = compute_area(8, 0, 0, 0, RugShape::Round);
/// let b = compute_area(8, 0, 99, 11, RugShape::Round);
/// assert_eq!(a, b);
/// ```
pub fn compute_area(
    width_feet: i32,
    width_inches: i32,
    length_feet: i32,
    length_inches: i32,
    shape: RugShape,
) -> f64 {
    let width = feet_to_decimal(width_feet, width_inches);

    match shape {
        RugShape::Rectangle => width * feet_to_decimal(length_feet, length_inches),
        RugShape::Round => PI * (width / 2.0).powi(2),
    }
}

// =============================================================================
// Line Amount Calculator
// =============================================================================

/// Monetary amount of one line under the given pricing mode.
///
/// Per-sqft modes multiply the area by `price_per_sq_ft`; per-rug modes use
/// `fixed_price`. A missing price counts as zero.
pub fn compute_line_amount(item: &LineItem, mode: PricingMode) -> f64 {
    if mode.is_per_sqft() {
        item.area() * item.price_per_sq_ft.unwrap_or(0.0)
    } else {
        item.fixed_price.unwrap_or(0.0)
    }
}

// =============================================================================
// Invoice Aggregator
// =============================================================================

/// Computes every line and the document totals.
///
/// The input is only borrowed; items are cloned into the result.
pub fn compute_invoice(document: &InvoiceDocument) -> CalculationResult {
    let mode = document.pricing_mode;

    let items: Vec<ComputedLineItem> = document
        .items
        .iter()
        .map(|item| ComputedLineItem {
            item: item.clone(),
            area: item.area(),
            amount: compute_line_amount(item, mode),
        })
        .collect();

    let subtotal = items.iter().fold(0.0, |acc, line| acc + line.amount);

    let discount = match document.discount_percentage {
        Some(pct) if mode.is_retail() && is_set(pct) => subtotal * (pct / 100.0),
        _ => 0.0,
    };

    let subtotal_after_discount = subtotal - discount;

    let sales_tax = if is_taxable(mode, document.document_type) {
        subtotal_after_discount * SALES_TAX_RATE
    } else {
        0.0
    };

    let total_due = subtotal_after_discount + sales_tax;

    trace!(
        mode = %mode,
        document_type = %document.document_type,
        items = items.len(),
        subtotal,
        discount,
        sales_tax,
        total_due,
        "Computed invoice totals"
    );

    CalculationResult {
        items,
        subtotal,
        discount,
        subtotal_after_discount,
        sales_tax,
        total_due,
    }
}

/// Sales tax applies to retail documents that are not consignments.
#[inline]
pub fn is_taxable(mode: PricingMode, document_type: DocumentType) -> bool {
    mode.is_retail() && document_type != DocumentType::Consignment
}

/// A zero or NaN percentage means "no discount".
#[inline]
fn is_set(pct: f64) -> bool {
    pct != 0.0 && !pct.is_nan()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_currency;
    use crate::types::Dimensions;
    use proptest::prelude::*;

    fn rect(wf: i32, wi: i32, lf: i32, li: i32) -> LineItem {
        LineItem::new("SKU", "Rug").with_dimensions(Dimensions::new(wf, wi, lf, li))
    }

    fn doc(
        document_type: DocumentType,
        mode: PricingMode,
        discount: Option<f64>,
        items: Vec<LineItem>,
    ) -> InvoiceDocument {
        let mut doc = InvoiceDocument::new(document_type, mode);
        doc.discount_percentage = discount;
        doc.items = items;
        doc
    }

    #[test]
    fn test_feet_to_decimal() {
        assert_eq!(feet_to_decimal(5, 0), 5.0);
        assert_eq!(feet_to_decimal(5, 6), 5.5);
        assert_eq!(feet_to_decimal(0, 3), 0.25);
    }

    #[test]
    fn test_rectangle_area() {
        assert_eq!(compute_area(5, 0, 4, 0, RugShape::Rectangle), 20.0);
        assert_eq!(compute_area(10, 0, 10, 0, RugShape::Rectangle), 100.0);
        assert_eq!(compute_area(2, 6, 4, 0, RugShape::Rectangle), 10.0);
    }

    #[test]
    fn test_round_area_reads_diameter_from_width() {
        let area = compute_area(8, 0, 0, 0, RugShape::Round);
        assert_eq!(area, PI * 16.0);

        // Length carries no meaning for round rugs
        assert_eq!(compute_area(8, 0, 12, 7, RugShape::Round), area);
        // Diameter lives in the width channel, not the length channel
        assert_eq!(compute_area(0, 0, 8, 0, RugShape::Round), 0.0);
    }

    #[test]
    fn test_degenerate_dimensions_flow_through() {
        assert_eq!(compute_area(0, 0, 9, 0, RugShape::Rectangle), 0.0);
        assert_eq!(compute_area(-2, 0, 3, 0, RugShape::Rectangle), -6.0);
    }

    #[test]
    fn test_nan_and_negative_inputs_flow_through() {
        // A NaN price poisons every total instead of panicking
        let document = doc(
            DocumentType::Invoice,
            PricingMode::RetailPerSqft,
            Some(10.0),
            vec![
                rect(10, 0, 10, 0).with_price_per_sq_ft(f64::NAN),
                rect(5, 0, 4, 0).with_price_per_sq_ft(10.0),
            ],
        );
        let result = compute_invoice(&document);
        assert!(result.items[0].amount.is_nan());
        assert_eq!(result.items[1].amount, 200.0);
        assert!(result.subtotal.is_nan());
        assert!(result.discount.is_nan());
        assert!(result.sales_tax.is_nan());
        assert!(result.total_due.is_nan());
        assert_eq!(format_currency(result.total_due), "$NaN");

        // Negative fixed prices are summed as given
        let document = doc(
            DocumentType::Invoice,
            PricingMode::RetailPerRug,
            Some(10.0),
            vec![
                rect(8, 0, 10, 0).with_fixed_price(300.0),
                rect(8, 0, 10, 0).with_fixed_price(-400.0),
            ],
        );
        let result = compute_invoice(&document);
        assert_eq!(result.subtotal, -100.0);
        assert_eq!(result.discount, -10.0);
        assert_eq!(result.subtotal_after_discount, result.subtotal - result.discount);
        assert_eq!(result.total_due, result.subtotal_after_discount + result.sales_tax);
        assert!(result.total_due < 0.0);

        // Negative dimensions give a negative area and amount
        let document = doc(
            DocumentType::Invoice,
            PricingMode::WholesalePerSqft,
            None,
            vec![rect(-2, 0, 3, 0).with_price_per_sq_ft(5.0)],
        );
        let result = compute_invoice(&document);
        assert_eq!(result.items[0].area, -6.0);
        assert_eq!(result.total_due, -30.0);
        assert_eq!(format_currency(result.total_due), "-$30.00");
    }

    #[test]
    fn test_line_amount_per_sqft() {
        let item = rect(5, 0, 4, 0).with_price_per_sq_ft(10.0);
        assert_eq!(compute_line_amount(&item, PricingMode::RetailPerSqft), 200.0);
        assert_eq!(compute_line_amount(&item, PricingMode::WholesalePerSqft), 200.0);
    }

    #[test]
    fn test_line_amount_per_rug_ignores_dimensions() {
        let small = rect(2, 0, 3, 0).with_fixed_price(300.0);
        let large = rect(12, 0, 18, 0).with_fixed_price(300.0);
        assert_eq!(compute_line_amount(&small, PricingMode::RetailPerRug), 300.0);
        assert_eq!(compute_line_amount(&large, PricingMode::WholesalePerRug), 300.0);
    }

    #[test]
    fn test_line_amount_uses_only_the_mode_price() {
        let item = rect(5, 0, 4, 0)
            .with_price_per_sq_ft(10.0)
            .with_fixed_price(999.0);
        assert_eq!(compute_line_amount(&item, PricingMode::RetailPerSqft), 200.0);
        assert_eq!(compute_line_amount(&item, PricingMode::RetailPerRug), 999.0);
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let item = rect(5, 0, 4, 0);
        assert_eq!(compute_line_amount(&item, PricingMode::RetailPerSqft), 0.0);
        assert_eq!(compute_line_amount(&item, PricingMode::RetailPerRug), 0.0);

        // A sqft price does not leak into per-rug pricing
        let item = item.with_price_per_sq_ft(10.0);
        assert_eq!(compute_line_amount(&item, PricingMode::WholesalePerRug), 0.0);
    }

    #[test]
    fn test_retail_sqft_invoice_scenario() {
        let document = doc(
            DocumentType::Invoice,
            PricingMode::RetailPerSqft,
            Some(10.0),
            vec![rect(10, 0, 10, 0).with_price_per_sq_ft(5.0)],
        );

        let result = compute_invoice(&document);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].area, 100.0);
        assert_eq!(result.items[0].amount, 500.0);
        assert_eq!(result.subtotal, 500.0);
        assert_eq!(result.discount, 50.0);
        assert_eq!(result.subtotal_after_discount, 450.0);
        assert!((result.sales_tax - 27.0).abs() < 1e-9);
        assert!((result.total_due - 477.0).abs() < 1e-9);
    }

    #[test]
    fn test_consignment_is_never_taxed() {
        let document = doc(
            DocumentType::Consignment,
            PricingMode::RetailPerSqft,
            Some(10.0),
            vec![rect(10, 0, 10, 0).with_price_per_sq_ft(5.0)],
        );

        let result = compute_invoice(&document);

        assert_eq!(result.discount, 50.0);
        assert_eq!(result.sales_tax, 0.0);
        assert_eq!(result.total_due, 450.0);

        let document = doc(
            DocumentType::Consignment,
            PricingMode::RetailPerRug,
            None,
            vec![rect(5, 0, 8, 0).with_fixed_price(1200.0)],
        );
        assert_eq!(compute_invoice(&document).sales_tax, 0.0);
    }

    #[test]
    fn test_wholesale_ignores_discount_and_tax() {
        let document = doc(
            DocumentType::Invoice,
            PricingMode::WholesalePerRug,
            Some(50.0),
            vec![rect(5, 0, 8, 0).with_fixed_price(800.0)],
        );

        let result = compute_invoice(&document);

        assert_eq!(result.subtotal, 800.0);
        assert_eq!(result.discount, 0.0);
        assert_eq!(result.sales_tax, 0.0);
        assert_eq!(result.total_due, 800.0);
    }

    #[test]
    fn test_zero_or_nan_discount_is_ignored() {
        for pct in [0.0, f64::NAN] {
            let document = doc(
                DocumentType::Invoice,
                PricingMode::RetailPerRug,
                Some(pct),
                vec![rect(5, 0, 8, 0).with_fixed_price(100.0)],
            );
            let result = compute_invoice(&document);
            assert_eq!(result.discount, 0.0);
            assert_eq!(result.subtotal_after_discount, 100.0);
        }
    }

    #[test]
    fn test_items_keep_document_order() {
        let items = vec![
            rect(5, 0, 8, 0).with_fixed_price(100.0),
            rect(2, 0, 3, 0).with_fixed_price(50.0),
            rect(9, 0, 12, 0).with_fixed_price(2500.0),
        ];
        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        let document = doc(DocumentType::Invoice, PricingMode::RetailPerRug, None, items);

        let result = compute_invoice(&document);

        let result_ids: Vec<String> = result.items.iter().map(|l| l.item.id.clone()).collect();
        assert_eq!(result_ids, ids);
        assert_eq!(result.subtotal, 2650.0);
    }

    #[test]
    fn test_input_document_is_untouched() {
        let document = doc(
            DocumentType::Invoice,
            PricingMode::RetailPerSqft,
            Some(15.0),
            vec![rect(6, 0, 9, 0).with_price_per_sq_ft(22.0)],
        );
        let before = document.clone();

        let first = compute_invoice(&document);
        let second = compute_invoice(&document);

        assert_eq!(document, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_document_totals_are_zero() {
        let document = InvoiceDocument::new(DocumentType::Invoice, PricingMode::RetailPerRug);
        let result = compute_invoice(&document);
        assert!(result.items.is_empty());
        assert_eq!(result.subtotal, 0.0);
        assert_eq!(result.total_due, 0.0);
        assert!(result.subtotal.is_sign_positive());
    }

    #[test]
    fn test_returned_items_are_still_priced() {
        let document = doc(
            DocumentType::Invoice,
            PricingMode::WholesalePerRug,
            None,
            vec![
                rect(5, 0, 8, 0).with_fixed_price(100.0),
                rect(5, 0, 8, 0)
                    .with_fixed_price(40.0)
                    .mark_returned(Some("Wrong colour".to_string())),
            ],
        );

        let result = compute_invoice(&document);

        assert_eq!(result.subtotal, 140.0);
        assert_eq!(result.returned_items().count(), 1);
        assert_eq!(result.total_area(), 80.0);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn mode_strategy() -> impl Strategy<Value = PricingMode> {
        prop::sample::select(PricingMode::ALL.to_vec())
    }

    fn document_type_strategy() -> impl Strategy<Value = DocumentType> {
        prop_oneof![Just(DocumentType::Invoice), Just(DocumentType::Consignment)]
    }

    fn item_strategy() -> impl Strategy<Value = LineItem> {
        (
            0i32..30,
            0i32..12,
            0i32..30,
            0i32..12,
            any::<bool>(),
            prop::option::of(0.0f64..500.0),
            prop::option::of(0.0f64..20_000.0),
        )
            .prop_map(|(wf, wi, lf, li, round, per_sqft, fixed)| {
                let shape = if round { RugShape::Round } else { RugShape::Rectangle };
                LineItem {
                    shape,
                    dimensions: Dimensions::new(wf, wi, lf, li),
                    price_per_sq_ft: per_sqft,
                    fixed_price: fixed,
                    ..LineItem::new("SKU", "Generated")
                }
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn rectangle_area_matches_formula(
            wf in 0i32..200, wi in 0i32..12, lf in 0i32..200, li in 0i32..12
        ) {
            let expected = (f64::from(wf) + f64::from(wi) / 12.0)
                * (f64::from(lf) + f64::from(li) / 12.0);
            prop_assert_eq!(compute_area(wf, wi, lf, li, RugShape::Rectangle), expected);
        }

        #[test]
        fn round_area_ignores_length(
            wf in 0i32..200, wi in 0i32..12, lf in -50i32..200, li in -12i32..12
        ) {
            let diameter = f64::from(wf) + f64::from(wi) / 12.0;
            let expected = PI * (diameter / 2.0).powi(2);
            prop_assert_eq!(compute_area(wf, wi, lf, li, RugShape::Round), expected);
            prop_assert_eq!(
                compute_area(wf, wi, lf, li, RugShape::Round),
                compute_area(wf, wi, 0, 0, RugShape::Round)
            );
        }

        #[test]
        fn totals_satisfy_identities(
            document_type in document_type_strategy(),
            mode in mode_strategy(),
            discount in prop::option::of(0.0f64..=100.0),
            items in prop::collection::vec(item_strategy(), 0..8)
        ) {
            let document = doc(document_type, mode, discount, items);
            let result = compute_invoice(&document);

            prop_assert_eq!(result.items.len(), document.items.len());
            prop_assert_eq!(result.subtotal_after_discount, result.subtotal - result.discount);
            prop_assert_eq!(result.total_due, result.subtotal_after_discount + result.sales_tax);
            prop_assert_eq!(result.total_due, result.subtotal - result.discount + result.sales_tax);

            if !mode.is_retail() {
                prop_assert_eq!(result.discount, 0.0);
                prop_assert_eq!(result.sales_tax, 0.0);
            }
            if document_type == DocumentType::Consignment {
                prop_assert_eq!(result.sales_tax, 0.0);
            }
        }
    }
}
