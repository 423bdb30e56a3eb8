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

//! A fixed-point `Money` amount, denominated in a specific [`Currency`].

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

use super::{
    currency::Currency,
    fixed::{MoneyRaw, check_fixed_precision, f64_to_fixed_i64, fixed_i64_to_f64},
};

/// The maximum valid money amount.
pub const MONEY_MAX: f64 = 9_223_372_036.0;

/// The minimum valid money amount.
pub const MONEY_MIN: f64 = -9_223_372_036.0;

/// Represents an amount of money in a specified currency denomination.
///
/// `precision` is always the currency's own precision rather than a caller-supplied value, since
/// an amount of money only makes sense at the denomination its currency defines.
#[repr(C)]
#[derive(Clone, Copy, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The raw fixed-point value scaled by `10^currency.precision`.
    pub raw: MoneyRaw,
    /// The currency denomination of the amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is outside the representable range.
    pub fn new_checked(amount: f64, currency: Currency) -> anyhow::Result<Self> {
        check_fixed_precision(currency.precision)?;
        if !(MONEY_MIN..=MONEY_MAX).contains(&amount) {
            anyhow::bail!(
                "invalid `amount` for `Money`, was {amount} outside range [{MONEY_MIN}, {MONEY_MAX}]"
            );
        }
        Ok(Self {
            raw: f64_to_fixed_i64(amount, currency.precision),
            currency,
        })
    }

    /// Creates a new [`Money`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is outside the representable range.
    #[must_use]
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self::new_checked(amount, currency).expect(FAILED)
    }

    /// Creates a new [`Money`] instance from the given raw fixed-point `raw` value, without any
    /// scaling.
    #[must_use]
    pub fn from_raw(raw: MoneyRaw, currency: Currency) -> Self {
        Self { raw, currency }
    }

    /// Returns a zero-valued [`Money`] in the given `currency`.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self { raw: 0, currency }
    }

    /// Returns whether this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Returns whether this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.raw > 0
    }

    /// Returns the value as an `f64`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        fixed_i64_to_f64(self.raw, self.currency.precision)
    }

    /// Returns the value as a [`Decimal`].
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.raw, u32::from(self.currency.precision))
    }
}

impl FromStr for Money {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split_whitespace().collect();
        let [amount_str, code] = parts.as_slice() else {
            return Err(format!(
                "invalid `Money` string '{value}', expected '<amount> <currency>'"
            ));
        };
        let amount: f64 = amount_str
            .parse()
            .map_err(|e| format!("invalid `Money` amount in '{value}': {e}"))?;
        let currency = Currency::from_str(code)?;
        Self::new_checked(amount, currency).map_err(|e| e.to_string())
    }
}

impl From<&str> for Money {
    fn from(value: &str) -> Self {
        Self::from_str(value).expect(FAILED)
    }
}

impl TryFrom<String> for Money {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.raw == other.raw
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.raw.cmp(&other.raw))
    }
}

impl Hash for Money {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
        self.currency.hash(state);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            raw: -self.raw,
            currency: self.currency,
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.currency, rhs.currency,
            "currency mismatch adding `Money` values"
        );
        Self {
            raw: self.raw + rhs.raw,
            currency: self.currency,
        }
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.currency, rhs.currency,
            "currency mismatch subtracting `Money` values"
        );
        Self {
            raw: self.raw - rhs.raw,
            currency: self.currency,
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.*} {}",
            self.currency.precision as usize,
            self.as_f64(),
            self.currency.code
        )
    }
}

impl Debug for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({self})", stringify!(Money))
    }
}
