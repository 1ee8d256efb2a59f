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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{App, theme::Theme, util::format::format_amount};

const KEY_HELP: &str = "h/l album  tab quantity  a add  d remove  q quit";

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// The screen is split into a title line, the sale table, and a footer with
/// the running sale total and key help.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(Block::default().style(Style::default().bg(app.theme.background_colour)), area);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    draw_title(f, outer[0], app);

    let table_area = Block::default().padding(Padding::horizontal(1)).inner(outer[1]);
    app.sale_table.draw(f, table_area, &app.theme);

    draw_footer(f, outer[2], app);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(" New sale", Style::default().fg(app.theme.accent_colour).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {} albums in catalog", app.data.catalog.len()),
            Style::default().fg(app.theme.footer_fg),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour));

    f.render_widget(Paragraph::new(title).block(block), area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(inner);

    f.render_widget(Paragraph::new(KEY_HELP).style(Style::default().fg(app.theme.footer_fg)), chunks[0]);

    let total = Line::from(vec![
        Span::raw("Total "),
        Span::styled(
            format_amount(app.sale_table.sale_total()),
            Style::default().fg(app.theme.table_price_fg).add_modifier(Modifier::BOLD),
        ),
    ])
    .right_aligned();

    f.render_widget(Paragraph::new(total), chunks[1]);
}
