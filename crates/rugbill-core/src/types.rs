//! # Domain Types
//!
//! Document types shared by the editor, the engine and the renderer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────┐          │
//! │  │   InvoiceDocument    │ 1    * │        LineItem          │          │
//! │  │  ──────────────────  │───────►│  ──────────────────────  │          │
//! │  │  invoice_number      │        │  id, sku, description    │          │
//! │  │  document_type       │        │  shape (RugShape)        │          │
//! │  │  pricing_mode        │        │  dimensions (ft / in)    │          │
//! │  │  discount_percentage │        │  price_per_sq_ft | fixed │          │
//! │  │  sold_to (Party)     │        │  returned + note         │          │
//! │  └──────────┬───────────┘        └──────────────────────────┘          │
//! │             │ compute_invoice()                                         │
//! │             ▼                                                           │
//! │  ┌──────────────────────┐        ┌──────────────────────────┐          │
//! │  │  CalculationResult   │ 1    * │    ComputedLineItem      │          │
//! │  │  subtotal, discount  │───────►│  LineItem + area, amount │          │
//! │  │  sales_tax, total    │        └──────────────────────────┘          │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names are camelCase to match the browser editor
//! (`widthFeet`, `pricePerSqFt`, `discountPercentage`, `soldTo`, ...).
//! Pricing modes use their kebab-case names (`retail-per-sqft`) and document
//! types are upper case (`INVOICE`, `CONSIGNMENT`).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::calculations::compute_area;
use crate::error::CoreError;

// =============================================================================
// Rug Shape
// =============================================================================

/// Physical outline of a rug.
///
/// Round rugs have a single measured dimension, carried in the width
/// fields of [`Dimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum RugShape {
    /// The editor creates new rows with an empty shape; those are rectangles.
    #[default]
    #[serde(alias = "", alias = "rectangular")]
    Rectangle,
    Round,
}

// =============================================================================
// Dimensions
// =============================================================================

/// Feet-and-inches measurements of a rug.
///
/// Inches are expected in `0..=11` but are not clamped; negative values are
/// representable and simply produce negative areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Dimensions {
    #[serde(deserialize_with = "lenient_i32")]
    pub width_feet: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub width_inches: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub length_feet: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub length_inches: i32,
}

/// Reads a dimension the way the editor's number inputs send it: an
/// integer, `null` or a blank string (both 0), or a numeric string.
fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Raw::Number(value)) => Ok(value),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(0),
        Some(Raw::Text(text)) => text.trim().parse().map_err(|_| {
            de::Error::custom(format!("expected a whole number of feet or inches, got '{}'", text))
        }),
    }
}

impl Dimensions {
    /// Creates dimensions from width and length in feet and inches.
    pub const fn new(
        width_feet: i32,
        width_inches: i32,
        length_feet: i32,
        length_inches: i32,
    ) -> Self {
        Dimensions {
            width_feet,
            width_inches,
            length_feet,
            length_inches,
        }
    }

    /// Dimensions of a round rug; only the diameter is recorded.
    pub const fn round(diameter_feet: i32, diameter_inches: i32) -> Self {
        Dimensions::new(diameter_feet, diameter_inches, 0, 0)
    }

    /// Square footage for the given shape.
    pub fn area(&self, shape: RugShape) -> f64 {
        compute_area(
            self.width_feet,
            self.width_inches,
            self.length_feet,
            self.length_inches,
            shape,
        )
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced rug entry on a document.
///
/// Which price field matters depends on the document's [`PricingMode`]; the
/// other one is ignored by the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within its document only.
    pub id: String,

    pub sku: String,

    pub description: String,

    pub shape: RugShape,

    #[serde(flatten)]
    pub dimensions: Dimensions,

    /// Used by the `*-per-sqft` modes.
    pub price_per_sq_ft: Option<f64>,

    /// Used by the `*-per-rug` modes.
    pub fixed_price: Option<f64>,

    /// Bookkeeping only. Returned rugs are still priced.
    pub returned: bool,

    pub return_note: Option<String>,
}

impl LineItem {
    /// Creates a rectangle item with a fresh id and no dimensions or prices.
    pub fn new(sku: impl Into<String>, description: impl Into<String>) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            sku: sku.into(),
            description: description.into(),
            ..LineItem::default()
        }
    }

    pub fn with_shape(mut self, shape: RugShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_price_per_sq_ft(mut self, price: f64) -> Self {
        self.price_per_sq_ft = Some(price);
        self
    }

    pub fn with_fixed_price(mut self, price: f64) -> Self {
        self.fixed_price = Some(price);
        self
    }

    /// Flags the rug as returned, with an optional note.
    pub fn mark_returned(mut self, note: Option<String>) -> Self {
        self.returned = true;
        self.return_note = note;
        self
    }

    /// Square footage of this rug.
    #[inline]
    pub fn area(&self) -> f64 {
        self.dimensions.area(self.shape)
    }
}

// =============================================================================
// Pricing Mode
// =============================================================================

/// How line items are priced, and whether discount and tax apply.
///
/// ```text
///                 │ per-rug (fixed_price)   │ per-sqft (area × price)
/// ────────────────┼─────────────────────────┼─────────────────────────
/// retail          │ discount + sales tax    │ discount + sales tax
/// wholesale       │ neither                 │ neither
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PricingMode {
    #[default]
    RetailPerRug,
    WholesalePerRug,
    RetailPerSqft,
    WholesalePerSqft,
}

impl PricingMode {
    pub const ALL: [PricingMode; 4] = [
        PricingMode::RetailPerRug,
        PricingMode::WholesalePerRug,
        PricingMode::RetailPerSqft,
        PricingMode::WholesalePerSqft,
    ];

    /// Retail modes apply the discount and sales tax.
    #[inline]
    pub const fn is_retail(&self) -> bool {
        matches!(self, PricingMode::RetailPerRug | PricingMode::RetailPerSqft)
    }

    /// Per-sqft modes price by area; per-rug modes use the fixed price.
    #[inline]
    pub const fn is_per_sqft(&self) -> bool {
        matches!(
            self,
            PricingMode::RetailPerSqft | PricingMode::WholesalePerSqft
        )
    }

    /// The wire name (`retail-per-rug`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PricingMode::RetailPerRug => "retail-per-rug",
            PricingMode::WholesalePerRug => "wholesale-per-rug",
            PricingMode::RetailPerSqft => "retail-per-sqft",
            PricingMode::WholesalePerSqft => "wholesale-per-sqft",
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PricingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PricingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownPricingMode(s.to_string()))
    }
}

// =============================================================================
// Document Type
// =============================================================================

/// Kind of document being issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    /// A sale. Taxed when the pricing mode is retail.
    #[default]
    #[serde(alias = "invoice")]
    Invoice,

    /// Goods held by the customer for future sale. Never taxed.
    #[serde(alias = "consignment")]
    Consignment,
}

impl DocumentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "INVOICE",
            DocumentType::Consignment => "CONSIGNMENT",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INVOICE" => Ok(DocumentType::Invoice),
            "CONSIGNMENT" => Ok(DocumentType::Consignment),
            _ => Err(CoreError::UnknownDocumentType(s.to_string())),
        }
    }
}

// =============================================================================
// Party
// =============================================================================

/// Customer the document is sold (or consigned) to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
}

impl Party {
    pub fn named(name: impl Into<String>) -> Self {
        Party {
            name: name.into(),
            ..Party::default()
        }
    }
}

// =============================================================================
// Invoice Document
// =============================================================================

/// The raw document the engine consumes.
///
/// Calculated fields are never stored here; see [`CalculationResult`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceDocument {
    /// Business identifier, e.g. `INV-00042`. Blank until assigned.
    pub invoice_number: String,

    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,

    pub sold_to: Party,

    pub document_type: DocumentType,

    pub pricing_mode: PricingMode,

    /// 0-100. Only honoured by retail modes.
    pub discount_percentage: Option<f64>,

    /// Display order; never re-sorted.
    pub items: Vec<LineItem>,

    pub notes: Option<String>,
}

impl InvoiceDocument {
    /// Creates an empty document of the given type and pricing mode.
    pub fn new(document_type: DocumentType, pricing_mode: PricingMode) -> Self {
        InvoiceDocument {
            document_type,
            pricing_mode,
            ..InvoiceDocument::default()
        }
    }

    /// True when at least one line item is flagged as returned.
    pub fn has_returns(&self) -> bool {
        self.items.iter().any(|item| item.returned)
    }
}

// =============================================================================
// Calculation Output
// =============================================================================

/// A line item with its computed square footage and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComputedLineItem {
    #[serde(flatten)]
    pub item: LineItem,

    /// Square feet.
    pub area: f64,

    pub amount: f64,
}

/// Totals for a document. Recomputed on demand, never persisted.
///
/// ## Invariants
/// - `subtotal_after_discount == subtotal - discount`
/// - `total_due == subtotal_after_discount + sales_tax`
///
/// No rounding happens here; round only when formatting for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Same order as the document's items.
    pub items: Vec<ComputedLineItem>,
    pub subtotal: f64,
    pub discount: f64,
    pub subtotal_after_discount: f64,
    pub sales_tax: f64,
    pub total_due: f64,
}

impl CalculationResult {
    /// Items flagged as returned, in document order.
    pub fn returned_items(&self) -> impl Iterator<Item = &ComputedLineItem> {
        self.items.iter().filter(|line| line.item.returned)
    }

    /// Combined square footage of every line.
    pub fn total_area(&self) -> f64 {
        self.items.iter().map(|line| line.area).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
