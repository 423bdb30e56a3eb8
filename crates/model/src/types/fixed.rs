// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Fixed-point scaling shared by [`Price`](super::Price), [`Quantity`](super::Quantity) and
//! [`Money`](super::Money).
//!
//! Values are stored as a scaled integer (`raw`) alongside the decimal `precision` that produced
//! it, avoiding the rounding drift of a plain `f64` representation while keeping arithmetic cheap.

use axiom_core::correctness::FAILED;

/// The raw integer representation of a [`Price`](super::Price).
pub type PriceRaw = i64;

/// The raw integer representation of a [`Quantity`](super::Quantity).
pub type QuantityRaw = u64;

/// The raw integer representation of a [`Money`](super::Money) amount.
pub type MoneyRaw = i64;

/// The maximum decimal precision supported by the fixed-point representation.
pub const FIXED_PRECISION: u8 = 9;

/// The scalar equivalent of [`FIXED_PRECISION`], i.e. `10^FIXED_PRECISION`.
pub const FIXED_SCALAR: f64 = 1_000_000_000.0;

/// The byte width used when encoding fixed-point values as Arrow `FixedSizeBinary`.
pub const FIXED_SIZE_BINARY: usize = 16;

/// Returns `10^precision` as an `f64`.
#[must_use]
pub fn pow10(precision: u8) -> f64 {
    10f64.powi(i32::from(precision))
}

/// Checks that `precision` does not exceed [`FIXED_PRECISION`].
///
/// # Errors
///
/// Returns an error if `precision` is greater than [`FIXED_PRECISION`].
pub fn check_fixed_precision(precision: u8) -> anyhow::Result<()> {
    if precision > FIXED_PRECISION {
        anyhow::bail!(
            "invalid `precision` greater than maximum {FIXED_PRECISION}, was {precision}"
        );
    }
    Ok(())
}

/// Scales `value` into a signed fixed-point integer at `precision`.
///
/// # Panics
///
/// Panics if `precision` is greater than [`FIXED_PRECISION`].
#[must_use]
pub fn f64_to_fixed_i64(value: f64, precision: u8) -> i64 {
    check_fixed_precision(precision).expect(FAILED);
    (value * pow10(precision)).round() as i64
}

/// Scales `value` into an unsigned fixed-point integer at `precision`.
///
/// # Panics
///
/// Panics if `precision` is greater than [`FIXED_PRECISION`], or if `value` is negative.
#[must_use]
pub fn f64_to_fixed_u64(value: f64, precision: u8) -> u64 {
    check_fixed_precision(precision).expect(FAILED);
    assert!(value >= 0.0, "invalid `value` negative, was {value}");
    (value * pow10(precision)).round() as u64
}

/// Converts a signed fixed-point integer at `precision` back into an `f64`.
#[must_use]
pub fn fixed_i64_to_f64(raw: i64, precision: u8) -> f64 {
    raw as f64 / pow10(precision)
}

/// Converts an unsigned fixed-point integer at `precision` back into an `f64`.
#[must_use]
pub fn fixed_u64_to_f64(raw: u64, precision: u8) -> f64 {
    raw as f64 / pow10(precision)
}
