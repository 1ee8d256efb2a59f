// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Line item pricing.
//!
//! Pure functions: the result depends only on the price index, the album
//! name and the quantity. Totals are plain `f64` products, no rounding to
//! currency precision is applied.

use crate::{error::PricingError, model::PriceIndex};

/// Computes `unit price * quantity` for one line item.
///
/// Any quantity is accepted, including zero and negative values.
///
/// # Errors
///
/// * [`PricingError::PriceNotFound`] if the album has no entry in the index.
/// * [`PricingError::PriceFormat`] if its price text has no `$` amount.
pub(crate) fn compute_line_total(prices: &PriceIndex, album_name: &str, quantity: f64) -> Result<f64, PricingError> {
    let price_text = prices
        .get(album_name)
        .ok_or_else(|| PricingError::PriceNotFound(album_name.to_string()))?;

    let unit_price = parse_price(price_text)?;

    Ok(unit_price * quantity)
}

/// Extracts the amount from currency text such as `"$12.50"`.
///
/// The amount is the text between the first `$` and the next `$` (or the end
/// of the string), ignoring surrounding whitespace.
pub(crate) fn parse_price(price_text: &str) -> Result<f64, PricingError> {
    price_text
        .split('$')
        .nth(1)
        .and_then(parse_decimal)
        .ok_or_else(|| PricingError::PriceFormat(price_text.to_string()))
}

/// Parses the contents of a quantity field.
pub(crate) fn parse_quantity(text: &str) -> Result<f64, PricingError> {
    parse_decimal(text).ok_or_else(|| PricingError::InvalidQuantity(text.to_string()))
}

/// Sums the line totals of a sale.
pub(crate) fn sale_total(totals: impl IntoIterator<Item = f64>) -> f64 {
    totals.into_iter().sum()
}

fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
