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

//! A fixed-point `Price` type with a specified decimal precision.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use axiom_core::correctness::FAILED;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fixed::{FIXED_PRECISION, check_fixed_precision, f64_to_fixed_i64, fixed_i64_to_f64};

pub type PriceRaw = i64;

/// Sentinel raw value representing "no price" (used where `Option<Price>` would otherwise be
/// needed at an FFI-style boundary).
pub const PRICE_UNDEF: PriceRaw = i64::MAX;

/// The maximum valid price value.
pub const PRICE_MAX: f64 = 9_223_372_036.0;

/// The minimum valid price value.
pub const PRICE_MIN: f64 = -9_223_372_036.0;

/// Represents a price in a market, as a signed fixed-point decimal value.
///
/// The number of decimal places is carried alongside the raw integer so that two prices derived
/// from instruments of differing tick size never silently compare or combine across precisions.
#[repr(C)]
#[derive(Clone, Copy, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    /// The raw fixed-point value scaled by `10^precision`.
    pub raw: PriceRaw,
    /// The decimal precision (number of decimal places).
    pub precision: u8,
}

impl Price {
    /// Creates a new [`Price`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `precision` is invalid, or if `value` is outside the representable
    /// range.
    pub fn new_checked(value: f64, precision: u8) -> anyhow::Result<Self> {
        check_fixed_precision(precision)?;
        if !(PRICE_MIN..=PRICE_MAX).contains(&value) {
            anyhow::bail!(
                "invalid `value` for `Price`, was {value} outside range [{PRICE_MIN}, {PRICE_MAX}]"
            );
        }
        Ok(Self {
            raw: f64_to_fixed_i64(value, precision),
            precision,
        })
    }

    /// Creates a new [`Price`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `precision` is invalid, or if `value` is outside the representable range.
    #[must_use]
    pub fn new(value: f64, precision: u8) -> Self {
        Self::new_checked(value, precision).expect(FAILED)
    }

    /// Creates a new [`Price`] instance from the given raw fixed-point `raw` value and
    /// `precision`, without any scaling.
    #[must_use]
    pub fn from_raw(raw: PriceRaw, precision: u8) -> Self {
        Self { raw, precision }
    }

    /// Returns a zero-valued [`Price`] at the given `precision`.
    #[must_use]
    pub fn zero(precision: u8) -> Self {
        Self { raw: 0, precision }
    }

    /// Returns the maximum representable [`Price`] at the given `precision`.
    #[must_use]
    pub fn max(precision: u8) -> Self {
        Self::new(PRICE_MAX, precision)
    }

    /// Returns the minimum representable [`Price`] at the given `precision`.
    #[must_use]
    pub fn min(precision: u8) -> Self {
        Self::new(PRICE_MIN, precision)
    }

    /// Returns whether this price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Returns whether this price is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.raw > 0
    }

    /// Returns the value as an `f64`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        fixed_i64_to_f64(self.raw, self.precision)
    }

    /// Returns the value as a [`Decimal`].
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.raw, u32::from(self.precision))
    }
}

impl FromStr for Price {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let float_val: f64 = value
            .parse()
            .map_err(|e| format!("invalid `Price` string '{value}': {e}"))?;
        let precision = precision_from_str(value);
        Self::new_checked(float_val, precision).map_err(|e| e.to_string())
    }
}

/// Infers the decimal precision implied by the digits following a `.` in `value`.
fn precision_from_str(value: &str) -> u8 {
    value
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len() as u8)
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self::from_str(value).expect(FAILED)
    }
}

impl From<i64> for Price {
    fn from(value: i64) -> Self {
        Self::new(value as f64, 0)
    }
}

impl TryFrom<String> for Price {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.to_string()
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero(0)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Hash for Price {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Neg for Price {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            raw: -self.raw,
            precision: self.precision,
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.precision, rhs.precision,
            "precision mismatch adding `Price` values"
        );
        Self {
            raw: self.raw + rhs.raw,
            precision: self.precision,
        }
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.precision, rhs.precision,
            "precision mismatch subtracting `Price` values"
        );
        Self {
            raw: self.raw - rhs.raw,
            precision: self.precision,
        }
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Price {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.*}", self.precision as usize, self.as_f64())
    }
}

impl Debug for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({self})", stringify!(Price))
    }
}
