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

//! UI rendering logic for the sale table.
//!
//! This module handles the visual representation of the line items, including
//! column layout, the focused cell and price/error colouring using the
//! Ratatui widget system.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Row, Table},
};
use tui_input::Input;

use crate::{
    components::sale_table::{Column, LineItem, PriceDisplay, SaleTable},
    render::Render,
    theme::Theme,
    util::format::format_amount,
};

impl Render for SaleTable {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.draw_table(f, area, theme);
    }
}

impl SaleTable {
    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let selected = self.table_state.selected();

        let rows: Vec<Row> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let focus = (selected == Some(i)).then_some(self.column);
                Row::new(vec![
                    Cell::from(Line::from(item.row.to_string()).style(Style::default().fg(theme.table_row_fg)).alignment(Alignment::Right)),
                    Cell::from(""),
                    Cell::from(self.album_line(item, focus == Some(Column::Album), theme)),
                    Cell::from(quantity_line(&item.quantity, focus == Some(Column::Quantity), theme).alignment(Alignment::Right)),
                    Cell::from(price_line(&item.price, theme).alignment(Alignment::Right)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(24),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(Line::from("#").alignment(Alignment::Right)),
                Cell::from(""),
                Cell::from("Album"),
                Cell::from(Line::from("Quantity").alignment(Alignment::Right)),
                Cell::from(Line::from("Price").alignment(Alignment::Right)),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.highlight_bg))
        .block(Block::default());

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn album_line(&self, item: &LineItem, focused: bool, theme: &Theme) -> Line<'static> {
        let name = self.album(item).map(|a| a.name.clone()).unwrap_or_else(|| "(no albums)".to_string());
        let style = Style::default().fg(theme.table_album_fg);

        if focused {
            Line::from(vec![
                Span::styled("‹ ", Style::default().fg(theme.accent_colour)),
                Span::styled(name, style.add_modifier(Modifier::BOLD)),
                Span::styled(" ›", Style::default().fg(theme.accent_colour)),
            ])
        } else {
            Line::from(Span::styled(name, style))
        }
    }
}

/// The quantity text, with a block cursor drawn in when the cell has focus.
fn quantity_line(input: &Input, focused: bool, theme: &Theme) -> Line<'static> {
    let style = Style::default().fg(theme.table_quantity_fg);
    let value = input.value();

    if !focused {
        return Line::from(Span::styled(value.to_string(), style));
    }

    let cursor = input.cursor();
    let before: String = value.chars().take(cursor).collect();
    let at: String = value.chars().nth(cursor).map(String::from).unwrap_or_else(|| " ".to_string());
    let after: String = value.chars().skip(cursor + 1).collect();

    Line::from(vec![
        Span::styled(before, style),
        Span::styled(at, style.add_modifier(Modifier::REVERSED)),
        Span::styled(after, style),
    ])
}

fn price_line(price: &PriceDisplay, theme: &Theme) -> Line<'static> {
    match price {
        PriceDisplay::Pending => Line::from(""),
        PriceDisplay::Total(total) => Line::from(format_amount(*total)).style(Style::default().fg(theme.table_price_fg)),
        PriceDisplay::Unavailable(e) => Line::from(e.to_string()).style(Style::default().fg(theme.error_fg)),
    }
}
