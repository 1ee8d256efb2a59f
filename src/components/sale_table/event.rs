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

//! Input handling and event processing for the sale table.
//!
//! This module maps raw terminal keyboard events to row navigation, album
//! selection and quantity editing, and reports the rows whose price needs to
//! be recomputed.

use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;

use crate::{
    components::sale_table::{Column, SaleTable, SaleTableAction},
    form::FormRenderer,
};

impl SaleTable {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<SaleTableAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        if self.column == Column::Quantity && is_quantity_edit(key_event) {
            return self.edit_quantity(event);
        }

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.goto_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.goto_previous();
                None
            }

            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_column();
                None
            }

            KeyCode::Char('h') | KeyCode::Left if self.column == Column::Album => {
                self.cycle_album(false).map(SaleTableAction::LineItemChanged)
            }
            KeyCode::Char('l') | KeyCode::Right if self.column == Column::Album => {
                self.cycle_album(true).map(SaleTableAction::LineItemChanged)
            }

            KeyCode::Char('a') => Some(SaleTableAction::LineItemChanged(self.add_row())),

            KeyCode::Enter => {
                if self.is_last_selected() {
                    Some(SaleTableAction::LineItemChanged(self.add_row()))
                } else {
                    self.goto_next();
                    None
                }
            }

            KeyCode::Char('d') => self.remove_current().map(SaleTableAction::RowRemoved),

            _ => None,
        }
    }

    fn edit_quantity(&mut self, event: &Event) -> Option<SaleTableAction> {
        let item = self.current_item_mut()?;
        let changed = item.quantity.handle_event(event).is_some_and(|c| c.value);

        changed.then_some(SaleTableAction::LineItemChanged(item.row))
    }
}

/// Keys owned by the quantity input while it has focus.
fn is_quantity_edit(key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char(c) => c.is_ascii_digit() || c == '.' || c == '-',
        KeyCode::Backspace | KeyCode::Delete | KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::{form::RowHandle, loader};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn table() -> SaleTable {
        let data = loader::load(
            r#"[{"id": 1, "albumname": "Abbey Road"}, {"id": 2, "albumname": "Revolver"}]"#,
            r#"[{"albumname": "Abbey Road", "price": "$12.50"}]"#,
        )
        .unwrap();
        let mut table = SaleTable::new(Rc::new(data));
        table.add_row();
        table
    }

    #[test]
    fn album_keys_change_selection() {
        let mut table = table();

        assert_eq!(table.process_event(&key(KeyCode::Right)), Some(SaleTableAction::LineItemChanged(RowHandle(1))));
        assert_eq!(table.items[0].album_index, Some(1));

        assert_eq!(table.process_event(&key(KeyCode::Char('h'))), Some(SaleTableAction::LineItemChanged(RowHandle(1))));
        assert_eq!(table.items[0].album_index, Some(0));
    }

    #[test]
    fn typing_in_quantity_column_edits_quantity() {
        let mut table = table();
        table.process_event(&key(KeyCode::Tab));

        assert_eq!(table.process_event(&key(KeyCode::Char('5'))), Some(SaleTableAction::LineItemChanged(RowHandle(1))));
        assert_eq!(table.items[0].quantity.value(), "15");

        table.process_event(&key(KeyCode::Home));
        table.process_event(&key(KeyCode::Delete));
        assert_eq!(table.items[0].quantity.value(), "5");

        // Letters are not quantity input, the album stays put too
        assert_eq!(table.process_event(&key(KeyCode::Char('x'))), None);
        assert_eq!(table.items[0].quantity.value(), "5");
        assert_eq!(table.items[0].album_index, Some(0));
    }

    #[test]
    fn add_and_enter_append_rows() {
        let mut table = table();

        assert_eq!(table.process_event(&key(KeyCode::Char('a'))), Some(SaleTableAction::LineItemChanged(RowHandle(2))));
        assert_eq!(table.process_event(&key(KeyCode::Enter)), Some(SaleTableAction::LineItemChanged(RowHandle(3))));

        table.process_event(&key(KeyCode::Up));
        assert_eq!(table.process_event(&key(KeyCode::Enter)), None);
        assert_eq!(table.current_row(), Some(RowHandle(3)));
        assert_eq!(table.items.len(), 3);
    }

    #[test]
    fn delete_removes_current_row() {
        let mut table = table();
        table.process_event(&key(KeyCode::Char('a')));

        assert_eq!(table.process_event(&key(KeyCode::Char('d'))), Some(SaleTableAction::RowRemoved(RowHandle(2))));
        assert_eq!(table.process_event(&key(KeyCode::Char('d'))), None);
        assert_eq!(table.items.len(), 1);
    }

    #[test]
    fn navigation_wraps() {
        let mut table = table();
        table.process_event(&key(KeyCode::Char('a')));

        table.process_event(&key(KeyCode::Down));
        assert_eq!(table.current_row(), Some(RowHandle(1)));
        table.process_event(&key(KeyCode::Char('k')));
        assert_eq!(table.current_row(), Some(RowHandle(2)));
    }
}
