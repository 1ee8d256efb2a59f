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

//! # Album Sale Form TUI.
//!
//! A terminal form for entering album sales: one row per line item, each
//! with an album picked from the catalog, a quantity, and the computed price.
//!
//! The catalog and price list are loaded once at start-up from two
//! HTML-escaped JSON files. If either cannot be loaded the application exits
//! before touching the terminal.
//!
//! ## Architecture
//!
//! All state lives on the main thread. A single input thread forwards
//! terminal events over a `std::sync::mpsc` channel, and the main thread
//! handles them one at a time, re-pricing and re-drawing after each.

mod cli;
mod components;
mod config;
mod error;
mod events;
mod form;
mod loader;
mod logging;
mod model;
mod pricing;
mod render;
mod theme;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    path::Path,
    rc::Rc,
    sync::mpsc::{self, Receiver, Sender},
    thread,
};
use tracing::{error, info};

use crate::{
    cli::Args,
    components::SaleTable,
    config::AppConfig,
    events::{AppEvent, process_events},
    form::{FormRenderer, update_line_item},
    model::SaleData,
    theme::Theme,
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub data: Rc<SaleData>,
    pub sale_table: SaleTable,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,
}

impl App {
    /// Create a new instance of application state, with one priced row ready
    /// for input.
    pub fn new(config: AppConfig, data: Rc<SaleData>, event_tx: Sender<AppEvent>, event_rx: Receiver<AppEvent>) -> Self {
        let mut sale_table = SaleTable::new(Rc::clone(&data));

        let row = sale_table.add_row();
        update_line_item(&mut sale_table, &data.prices, row);

        Self {
            config,
            theme: Theme::default(),
            data,
            sale_table,
            event_tx,
            event_rx,
        }
    }
}

/// The entry point of the application.
///
/// Loads configuration and sale data, manages the terminal lifecycle, and
/// returns an error if any part of the execution fails.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config().with_args(&args);

    logging::init(&config)?;
    info!(catalog = %config.catalog_file, prices = %config.price_list_file, "Starting sale form");

    let data = loader::load_files(Path::new(&config.catalog_file), Path::new(&config.price_list_file))
        .inspect_err(|e| error!(error = %e, "Failed to load sale data"))
        .context("Failed to load sale data")?;

    let (event_tx, event_rx) = mpsc::channel();
    let mut app = App::new(config, Rc::new(data), event_tx, event_rx);

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It also ensures the
/// cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

/// Starts the input thread and enters the main event loop.
///
/// The input thread only translates raw terminal events to application
/// events, all state changes happen in [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tx_input = app.event_tx.clone();
    thread::spawn(move || events::forward_terminal_events(event::read, &tx_input));

    info!(log_level = %app.config.log_level, "Sale form ready");

    process_events(terminal, app)
}
