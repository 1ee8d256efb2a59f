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

//! Interactive sale table widget and state management.
//!
//! Each row of the table is a line item: an album chosen from the catalog, a
//! quantity typed by the user and the resulting price. The table is the
//! terminal implementation of [`FormRenderer`], it owns the rows and their
//! identities but never computes a price itself.

mod event;
mod render;

use std::rc::Rc;

use ratatui::widgets::TableState;
use tracing::debug;
use tui_input::Input;

use crate::{
    error::PricingError,
    form::{FormRenderer, RowHandle, Selection},
    model::{Album, SaleData},
    pricing,
};

const DEFAULT_QUANTITY: &str = "1";

/// Emitted by the table when something outside it has to react.
#[derive(Debug, PartialEq)]
pub(crate) enum SaleTableAction {
    /// The row's album or quantity changed, or the row is new.
    LineItemChanged(RowHandle),
    RowRemoved(RowHandle),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Column {
    Album,
    Quantity,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PriceDisplay {
    Pending,
    Total(f64),
    Unavailable(PricingError),
}

pub(crate) struct LineItem {
    pub(crate) row: RowHandle,
    pub(crate) album_index: Option<usize>,
    pub(crate) quantity: Input,
    pub(crate) price: PriceDisplay,
}

pub(crate) struct SaleTable {
    data: Rc<SaleData>,
    pub(crate) items: Vec<LineItem>,
    pub(crate) table_state: TableState,
    pub(crate) column: Column,
    next_row: u32,
}

impl SaleTable {
    pub(crate) fn new(data: Rc<SaleData>) -> Self {
        Self {
            data,
            items: vec![],
            table_state: TableState::new(),
            column: Column::Album,
            next_row: 1,
        }
    }

    pub(crate) fn album(&self, item: &LineItem) -> Option<&Album> {
        item.album_index.and_then(|i| self.data.catalog.get(i))
    }

    pub(crate) fn current_row(&self) -> Option<RowHandle> {
        self.current_item().map(|item| item.row)
    }

    /// Line totals of every row that currently has one.
    pub(crate) fn line_totals(&self) -> impl Iterator<Item = f64> + '_ {
        self.items.iter().filter_map(|item| match item.price {
            PriceDisplay::Total(total) => Some(total),
            _ => None,
        })
    }

    pub(crate) fn sale_total(&self) -> f64 {
        pricing::sale_total(self.line_totals())
    }

    fn current_item(&self) -> Option<&LineItem> {
        self.table_state.selected().and_then(|i| self.items.get(i))
    }

    fn current_item_mut(&mut self) -> Option<&mut LineItem> {
        self.table_state.selected().and_then(|i| self.items.get_mut(i))
    }

    fn item(&self, row: RowHandle) -> Option<&LineItem> {
        self.items.iter().find(|item| item.row == row)
    }

    fn is_last_selected(&self) -> bool {
        self.table_state.selected() == Some(self.items.len().saturating_sub(1))
    }

    fn goto_next(&mut self) {
        let len = self.items.len();
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.items.len();
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn toggle_column(&mut self) {
        self.column = match self.column {
            Column::Album => Column::Quantity,
            Column::Quantity => Column::Album,
        };
    }

    /// Moves the current row's album selection forwards or backwards through
    /// the catalog, wrapping at either end.
    fn cycle_album(&mut self, forward: bool) -> Option<RowHandle> {
        let len = self.data.catalog.len();
        if len == 0 {
            return None;
        }

        let item = self.current_item_mut()?;
        let index = match (item.album_index, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        item.album_index = Some(index);
        let row = item.row;

        if let Some(album) = self.data.catalog.get(index) {
            debug!(%row, album = %album.name, id = %album.id, "Album selected");
        }

        Some(row)
    }

    /// Removes the current row. The last remaining row is kept so the form
    /// always has somewhere to type.
    fn remove_current(&mut self) -> Option<RowHandle> {
        if self.items.len() <= 1 {
            return None;
        }

        let index = self.table_state.selected()?;
        let removed = self.items.remove(index).row;

        if index >= self.items.len() {
            self.table_state.select(Some(self.items.len() - 1));
        }

        debug!(row = %removed, remaining = self.items.len(), "Removed line item");

        Some(removed)
    }
}

impl FormRenderer for SaleTable {
    fn add_row(&mut self) -> RowHandle {
        let row = RowHandle(self.next_row);
        self.next_row += 1;

        self.items.push(LineItem {
            row,
            album_index: (!self.data.catalog.is_empty()).then_some(0),
            quantity: Input::new(DEFAULT_QUANTITY.to_string()),
            price: PriceDisplay::Pending,
        });
        self.table_state.select(Some(self.items.len() - 1));

        debug!(%row, "Added line item");

        row
    }

    fn set_price(&mut self, row: RowHandle, total: Result<f64, PricingError>) {
        if let Some(item) = self.items.iter_mut().find(|item| item.row == row) {
            item.price = match total {
                Ok(value) => PriceDisplay::Total(value),
                Err(e) => PriceDisplay::Unavailable(e),
            };
        }
    }

    fn get_selection(&self, row: RowHandle) -> Option<Result<Selection, PricingError>> {
        let item = self.item(row)?;
        let album = self.album(item)?;

        Some(
            pricing::parse_quantity(item.quantity.value()).map(|quantity| Selection {
                album_name: album.name.clone(),
                quantity,
            }),
        )
    }
}
