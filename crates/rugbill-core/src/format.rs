//! # Display Formatting
//!
//! String formatting for the printed document and the editor preview.
//! Nothing here feeds back into a calculation.
//!
//! ```rust
//! use rugbill_core::format::{format_currency, format_sqft};
//!
//! assert_eq!(format_currency(1234.5), "$1,234.50");
//! assert_eq!(format_sqft(100.0), "100.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Dimensions, RugShape};

/// Formats a dollar amount: thousands separators, two decimals.
///
/// The shortest decimal form of `amount` is rounded half away from zero at
/// the cent, so `1.035` prints as `$1.04` even though its binary value sits
/// just below the midpoint. Any negative amount carries the sign, including
/// one that rounds to `-$0.00`; negative zero prints as `$0.00`. NaN and
/// infinities render as `$NaN` / `$inf` so bad input stays visible on the
/// preview.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let magnitude = amount.abs();

    // f64 Display never uses an exponent. Text outside Decimal's range
    // (~7.9e28, or more than 28 fraction digits) falls back to binary rounding.
    let fixed = match magnitude.to_string().parse::<Decimal>() {
        Ok(exact) => format!(
            "{:.2}",
            exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        Err(_) => format!("{:.2}", magnitude),
    };

    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Formats square footage with two decimals and no unit.
pub fn format_sqft(area: f64) -> String {
    format!("{:.2}", area)
}

/// Formats rug dimensions for a document line.
///
/// Rectangles read `5' 4" x 8' 0"`; round rugs show the diameter only,
/// `8' 0" round`.
pub fn format_dimensions(dimensions: &Dimensions, shape: RugShape) -> String {
    let width = feet_inches(dimensions.width_feet, dimensions.width_inches);

    match shape {
        RugShape::Rectangle => format!(
            "{} x {}",
            width,
            feet_inches(dimensions.length_feet, dimensions.length_inches)
        ),
        RugShape::Round => format!("{} round", width),
    }
}

fn feet_inches(feet: i32, inches: i32) -> String {
    format!("{}' {}\"", feet, inches)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
