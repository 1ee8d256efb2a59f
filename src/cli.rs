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

//! Command line arguments.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "albumsale")]
#[command(about = "Enter album sales in the terminal")]
#[command(version)]
pub struct Args {
    /// Encoded album catalog file
    #[arg(short, long)]
    pub catalog: Option<String>,

    /// Encoded price list file
    #[arg(short, long)]
    pub prices: Option<String>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
