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

//! A fixed-point, non-negative `Quantity` type with a specified decimal precision.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use axiom_core::correctness::FAILED;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fixed::{check_fixed_precision, f64_to_fixed_u64, fixed_u64_to_f64};

pub type QuantityRaw = u64;

/// The maximum valid quantity value.
pub const QUANTITY_MAX: f64 = 18_446_744_073.0;

/// Represents a non-negative quantity, as a fixed-point decimal value.
#[repr(C)]
#[derive(Clone, Copy, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity {
    /// The raw fixed-point value scaled by `10^precision`.
    pub raw: QuantityRaw,
    /// The decimal precision (number of decimal places).
    pub precision: u8,
}

impl Quantity {
    /// Creates a new [`Quantity`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `precision` is invalid, or `value` is negative or out of range.
    pub fn new_checked(value: f64, precision: u8) -> anyhow::Result<Self> {
        check_fixed_precision(precision)?;
        if !(0.0..=QUANTITY_MAX).contains(&value) {
            anyhow::bail!(
                "invalid `value` for `Quantity`, was {value} outside range [0, {QUANTITY_MAX}]"
            );
        }
        Ok(Self {
            raw: f64_to_fixed_u64(value, precision),
            precision,
        })
    }

    /// Creates a new [`Quantity`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `precision` is invalid, or `value` is negative or out of range.
    #[must_use]
    pub fn new(value: f64, precision: u8) -> Self {
        Self::new_checked(value, precision).expect(FAILED)
    }

    /// Creates a new [`Quantity`] instance from the given raw fixed-point `raw` value and
    /// `precision`, without any scaling.
    #[must_use]
    pub fn from_raw(raw: QuantityRaw, precision: u8) -> Self {
        Self { raw, precision }
    }

    /// Returns a zero-valued [`Quantity`] at the given `precision`.
    #[must_use]
    pub fn zero(precision: u8) -> Self {
        Self { raw: 0, precision }
    }

    /// Returns whether this quantity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Returns whether this quantity is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.raw > 0
    }

    /// Returns the value as an `f64`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        fixed_u64_to_f64(self.raw, self.precision)
    }

    /// Returns the value as a [`Decimal`].
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.raw as i64, u32::from(self.precision))
    }
}

impl FromStr for Quantity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let cleaned: String = value.chars().filter(|c| *c != ',').collect();
        let float_val: f64 = cleaned
            .parse()
            .map_err(|e| format!("invalid `Quantity` string '{value}': {e}"))?;
        let precision = cleaned
            .split_once('.')
            .map_or(0, |(_, frac)| frac.len() as u8);
        Self::new_checked(float_val, precision).map_err(|e| e.to_string())
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::from_str(value).expect(FAILED)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self::new(value as f64, 0)
    }
}

impl TryFrom<String> for Quantity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Quantity> for String {
    fn from(value: Quantity) -> Self {
        value.to_string()
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::zero(0)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.precision, rhs.precision,
            "precision mismatch adding `Quantity` values"
        );
        Self {
            raw: self.raw + rhs.raw,
            precision: self.precision,
        }
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.precision, rhs.precision,
            "precision mismatch subtracting `Quantity` values"
        );
        Self {
            raw: self.raw.checked_sub(rhs.raw).unwrap_or_else(|| {
                panic!("underflow subtracting `Quantity` {rhs} from {self}")
            }),
            precision: self.precision,
        }
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.*}", self.precision as usize, self.as_f64())
    }
}

impl Debug for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({self})", stringify!(Quantity))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_and_display() {
        let qty = Quantity::new(100.0, 0);
        assert_eq!(qty.to_string(), "100");
    }

    #[rstest]
    fn test_from_str_infers_precision() {
        let qty = Quantity::from("0.561");
        assert_eq!(qty.precision, 3);
        assert_eq!(qty.as_f64(), 0.561);
    }

    #[rstest]
    fn test_from_str_strips_commas() {
        let qty = Quantity::from_str("1,000,000").unwrap();
        assert_eq!(qty.as_f64(), 1_000_000.0);
    }

    #[rstest]
    fn test_from_u64() {
        let qty = Quantity::from(100_000);
        assert_eq!(qty.precision, 0);
        assert_eq!(qty.to_string(), "100000");
    }

    #[rstest]
    fn test_arithmetic() {
        let a = Quantity::from("10");
        let b = Quantity::from("4");
        assert_eq!((a - b).to_string(), "6");
        assert_eq!((a + b).to_string(), "14");
    }

    #[rstest]
    #[should_panic(expected = "underflow")]
    fn test_sub_underflow_panics() {
        let a = Quantity::from("1");
        let b = Quantity::from("2");
        let _ = a - b;
    }

    #[rstest]
    #[should_panic(expected = "outside range")]
    fn test_new_checked_rejects_negative() {
        Quantity::new(-1.0, 0);
    }
}
