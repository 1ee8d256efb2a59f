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

//! Application configuration.
//!
//! This module manages the application configuration file. Command line
//! arguments, when given, take precedence over the stored values.

use serde::{Deserialize, Serialize};

use crate::cli::Args;

const CONFIG_NAME: &str = "albumsale";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub version: u32,
    pub catalog_file: String,
    pub price_list_file: String,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            catalog_file: "catalog.json".to_string(),
            price_list_file: "prices.json".to_string(),
            log_file: "albumsale.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Overlays command line arguments onto the stored configuration.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(catalog) = &args.catalog {
            self.catalog_file = catalog.clone();
        }
        if let Some(prices) = &args.prices {
            self.price_list_file = prices.clone();
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = log_file.clone();
        }
        if args.verbose {
            self.log_level = "debug".to_string();
        }
        self
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
