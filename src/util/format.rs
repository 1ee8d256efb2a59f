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

/// Formats a computed amount for display.
///
/// The value is shown exactly as computed, in the shortest form that reads
/// back to the same number. No rounding to cents is done, so a total such as
/// `9.99 * 3` shows its floating point tail.
///
/// # Arguments
///
/// * `amount` - The line or sale total.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_amount(37.5), "37.5");
/// assert_eq!(format_amount(20.0), "20");
/// ```
pub(crate) fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}
