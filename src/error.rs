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

//! Error types.
//!
//! Two families of failure exist:
//!
//! * [`IngestionError`] - the catalog or price list could not be decoded or
//!   parsed. There is no usable state without both, so these are fatal.
//! * [`PricingError`] - a single line item could not be priced. These are
//!   local to the row that produced them.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum IngestionError {
    #[error("Invalid character reference '{sequence}'")]
    Entity { sequence: String },

    #[error("Invalid {payload} JSON: {source}")]
    Json {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum PricingError {
    #[error("No price for '{0}'")]
    PriceNotFound(String),

    #[error("Bad price '{0}'")]
    PriceFormat(String),

    #[error("Bad quantity '{0}'")]
    InvalidQuantity(String),
}
