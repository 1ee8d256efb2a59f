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

//! Domain models and core data structures.
//!
//! This module defines the albums offered for sale and their prices, as
//! delivered by the catalog and price list payloads.
//!
//! Prices are joined to albums by album *name*, not by identifier. Two albums
//! sharing a name therefore share a price, and renaming an album in one
//! payload but not the other loses its price.

use std::{collections::HashMap, fmt};

use serde::Deserialize;

/// Album identifier, the catalog delivers either numbers or strings.
///
/// Numbers are kept as JSON numbers so floats and values beyond `i64` load
/// as well as plain integers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum AlbumId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlbumId::Number(n) => write!(f, "{n}"),
            AlbumId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Album {
    pub(crate) id: AlbumId,
    #[serde(rename = "albumname")]
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PriceEntry {
    #[serde(rename = "albumname")]
    pub(crate) album_name: String,
    #[serde(rename = "price")]
    pub(crate) price_text: String,
}

/// Albums available for selection, in payload order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Catalog {
    albums: Vec<Album>,
}

impl Catalog {
    pub(crate) fn new(albums: Vec<Album>) -> Self {
        Self { albums }
    }

    pub(crate) fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Album> {
        self.albums.get(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.albums.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

/// Album name to raw price text.
///
/// The text is kept exactly as delivered (e.g. `"$12.50"`), it is only
/// parsed when a line item is priced.
#[derive(Debug, Clone, Default)]
pub(crate) struct PriceIndex {
    prices: HashMap<String, String>,
}

impl PriceIndex {
    /// Sets the price text for an album, returning the text it replaced.
    pub(crate) fn insert(&mut self, album_name: String, price_text: String) -> Option<String> {
        self.prices.insert(album_name, price_text)
    }

    pub(crate) fn get(&self, album_name: &str) -> Option<&str> {
        self.prices.get(album_name).map(String::as_str)
    }

    pub(crate) fn contains(&self, album_name: &str) -> bool {
        self.prices.contains_key(album_name)
    }

    pub(crate) fn len(&self) -> usize {
        self.prices.len()
    }
}

/// Everything the sale form needs, built once at start-up and read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub(crate) struct SaleData {
    pub(crate) catalog: Catalog,
    pub(crate) prices: PriceIndex,
}
