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

//! The boundary between the sale form and whatever draws it.
//!
//! Pricing never talks to widgets directly. A rendering surface implements
//! [`FormRenderer`] and [`update_line_item`] moves values across it: read a
//! row's selection, price it, write the result back.

use std::fmt;

use tracing::debug;

use crate::{error::PricingError, model::PriceIndex, pricing};

/// Identity of one form row.
///
/// Handles come from a counter owned by the renderer and are never reused,
/// so a handle held across a row removal cannot alias a newer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct RowHandle(pub(crate) u32);

impl fmt::Display for RowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a row currently asks to be priced.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Selection {
    pub(crate) album_name: String,
    pub(crate) quantity: f64,
}

pub(crate) trait FormRenderer {
    /// Appends a new row and returns its handle.
    fn add_row(&mut self) -> RowHandle;

    /// Shows a line total, or the reason there isn't one, in a row.
    fn set_price(&mut self, row: RowHandle, total: Result<f64, PricingError>);

    /// Reads a row's album and quantity.
    ///
    /// Returns `None` if the row does not exist or has no album to select,
    /// and an error if the quantity field is not a number.
    fn get_selection(&self, row: RowHandle) -> Option<Result<Selection, PricingError>>;
}

/// Re-prices a single row.
///
/// Called whenever a row's album or quantity changes, and when a row is
/// first added.
pub(crate) fn update_line_item<R: FormRenderer + ?Sized>(renderer: &mut R, prices: &PriceIndex, row: RowHandle) {
    let Some(selection) = renderer.get_selection(row) else {
        return;
    };

    let total = selection.and_then(|s| pricing::compute_line_total(prices, &s.album_name, s.quantity));

    match &total {
        Ok(value) => debug!(%row, total = value, "Priced line item"),
        Err(e) => debug!(%row, error = %e, "Line item not priced"),
    }

    renderer.set_price(row, total);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Default)]
    struct FakeRow {
        album: Option<String>,
        quantity: String,
        price: Option<Result<f64, PricingError>>,
    }

    #[derive(Default)]
    struct FakeForm {
        rows: BTreeMap<RowHandle, FakeRow>,
        next: u32,
    }

    impl FormRenderer for FakeForm {
        fn add_row(&mut self) -> RowHandle {
            self.next += 1;
            let row = RowHandle(self.next);
            self.rows.insert(row, FakeRow::default());
            row
        }

        fn set_price(&mut self, row: RowHandle, total: Result<f64, PricingError>) {
            if let Some(r) = self.rows.get_mut(&row) {
                r.price = Some(total);
            }
        }

        fn get_selection(&self, row: RowHandle) -> Option<Result<Selection, PricingError>> {
            let r = self.rows.get(&row)?;
            let album_name = r.album.clone()?;
            Some(pricing::parse_quantity(&r.quantity).map(|quantity| Selection { album_name, quantity }))
        }
    }

    fn prices() -> PriceIndex {
        let mut prices = PriceIndex::default();
        prices.insert("Abbey Road".into(), "$12.50".into());
        prices.insert("Broken".into(), "nine dollars".into());
        prices
    }

    fn form_with(album: &str, quantity: &str) -> (FakeForm, RowHandle) {
        let mut form = FakeForm::default();
        let row = form.add_row();
        let r = form.rows.get_mut(&row).unwrap();
        r.album = Some(album.into());
        r.quantity = quantity.into();
        (form, row)
    }

    #[test]
    fn writes_line_total_into_row() {
        let (mut form, row) = form_with("Abbey Road", "3");
        update_line_item(&mut form, &prices(), row);
        assert_eq!(form.rows[&row].price, Some(Ok(37.5)));
    }

    #[test]
    fn writes_errors_into_row() {
        let (mut form, row) = form_with("Let It Be", "1");
        update_line_item(&mut form, &prices(), row);
        assert_eq!(form.rows[&row].price, Some(Err(PricingError::PriceNotFound("Let It Be".into()))));

        let (mut form, row) = form_with("Broken", "1");
        update_line_item(&mut form, &prices(), row);
        assert_eq!(form.rows[&row].price, Some(Err(PricingError::PriceFormat("nine dollars".into()))));

        let (mut form, row) = form_with("Abbey Road", "lots");
        update_line_item(&mut form, &prices(), row);
        assert_eq!(form.rows[&row].price, Some(Err(PricingError::InvalidQuantity("lots".into()))));
    }

    #[test]
    fn rows_are_priced_independently() {
        let (mut form, first) = form_with("Abbey Road", "1");
        let second = form.add_row();
        {
            let r = form.rows.get_mut(&second).unwrap();
            r.album = Some("Abbey Road".into());
            r.quantity = "2".into();
        }

        update_line_item(&mut form, &prices(), second);

        assert_eq!(form.rows[&first].price, None);
        assert_eq!(form.rows[&second].price, Some(Ok(25.0)));
    }

    #[test]
    fn ignores_rows_without_selection() {
        let mut form = FakeForm::default();
        let row = form.add_row();

        update_line_item(&mut form, &prices(), row);
        update_line_item(&mut form, &prices(), RowHandle(99));

        assert_eq!(form.rows[&row].price, None);
    }
}
