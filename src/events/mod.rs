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

//! Application event distribution.
//!
//! This module bridges user input and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Terminal input arrives as [`AppEvent`]s through a
//!    channel fed by the input thread.
//! 2. **Process**: The [`process_events`] function updates the [`App`]
//!    state, re-pricing any line item the event touched.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!   `ratatui` terminal.
//!
//! Every event is handled to completion before the next one is received.

use std::{
    io::{self, Stdout},
    sync::mpsc::Sender,
};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{debug, error, info};

use crate::{App, components::SaleTableAction, form::update_line_item, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Resize,
    ExitApplication,
}

/// Translates raw terminal events into application events until input fails
/// or the receiver goes away.
///
/// A read error ends the application: without input the user could never
/// quit, so [`AppEvent::ExitApplication`] is queued before returning.
pub(crate) fn forward_terminal_events<F>(mut read: F, event_tx: &Sender<AppEvent>)
where
    F: FnMut() -> io::Result<Event>,
{
    loop {
        let sent = match read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => event_tx.send(AppEvent::Key(key)),
            Ok(Event::Resize(_, _)) => event_tx.send(AppEvent::Resize),
            Ok(_) => Ok(()),
            Err(e) => {
                error!(error = %e, "Terminal input failed");
                let _ = event_tx.send(AppEvent::ExitApplication);
                return;
            }
        };
        if sent.is_err() {
            return;
        }
    }
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::Resize => {}
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    info!(rows = app.sale_table.items.len(), total = app.sale_table.sale_total(), "Sale form closed");

    Ok(())
}

/// Maps keyboard input to application actions.
///
/// Quitting is handled here, everything else belongs to the sale table. Any
/// row the table reports as changed is re-priced before the next redraw.
///
/// # Errors
///
/// Returns an error if the exit event cannot be queued.
pub(crate) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
            return Ok(());
        }
        _ => {}
    }

    match app.sale_table.process_event(&Event::Key(key)) {
        Some(SaleTableAction::LineItemChanged(row)) => {
            update_line_item(&mut app.sale_table, &app.data.prices, row);
        }
        Some(SaleTableAction::RowRemoved(row)) => {
            debug!(%row, current = ?app.sale_table.current_row(), "Row removed from sale");
        }
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{rc::Rc, sync::mpsc};

    use super::*;
    use crate::{components::sale_table::PriceDisplay, config::AppConfig, loader};

    fn app() -> App {
        let data = loader::load(
            r#"[{"id": 1, "albumname": "Abbey Road"}, {"id": 2, "albumname": "Let It Be"}]"#,
            r#"[{"albumname": "Abbey Road", "price": "$12.50"}]"#,
        )
        .unwrap();
        let (event_tx, event_rx) = mpsc::channel();
        App::new(AppConfig::default(), Rc::new(data), event_tx, event_rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        process_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn first_row_is_priced_on_start() {
        let app = app();
        assert_eq!(app.sale_table.items.len(), 1);
        assert_eq!(app.sale_table.items[0].price, PriceDisplay::Total(12.5));
    }

    #[test]
    fn quantity_change_reprices_row() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('3'));

        assert_eq!(app.sale_table.items[0].price, PriceDisplay::Total(37.5));
    }

    #[test]
    fn album_without_price_shows_error_in_its_row_only() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Right);

        assert_eq!(app.sale_table.items[0].price, PriceDisplay::Total(12.5));
        assert!(matches!(app.sale_table.items[1].price, PriceDisplay::Unavailable(_)));
    }

    #[test]
    fn input_failure_queues_exit() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut reads = vec![
            Err(io::Error::other("tty gone")),
            Ok(Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE))),
        ];

        forward_terminal_events(|| reads.pop().unwrap(), &event_tx);

        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::Key(_))));
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn quit_key_queues_exit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
    }
}
