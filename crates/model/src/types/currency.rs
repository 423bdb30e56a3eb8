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

//! A `Currency` identified by ISO 4217 code or a custom code for crypto assets.

use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::enums::CurrencyType;

/// Represents a medium of exchange in a specified denomination with a specified decimal precision.
///
/// Equality and hashing are determined solely by the `code`, consistent with the one-currency-per-
/// code invariant enforced by the built-in [`CURRENCY_MAP`](super::super::currencies::CURRENCY_MAP).
#[repr(C)]
#[derive(Clone, Copy, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// The currency code, e.g. `"USD"`, `"BTC"`.
    pub code: Ustr,
    /// The decimal precision used when displaying amounts in this currency.
    pub precision: u8,
    /// The ISO 4217 currency code (`0` for currencies with no ISO 4217 code, e.g. crypto assets).
    pub iso4217: u16,
    /// The full name of the currency.
    pub name: Ustr,
    /// The currency type, determining how the amount is interpreted.
    pub currency_type: CurrencyType,
}

impl Currency {
    /// Creates a new [`Currency`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `precision` is invalid, or `code`/`name` are empty.
    pub fn new_checked(
        code: &str,
        precision: u8,
        iso4217: u16,
        name: &str,
        currency_type: CurrencyType,
    ) -> anyhow::Result<Self> {
        if code.is_empty() {
            anyhow::bail!("invalid `Currency` code, was empty");
        }
        if name.is_empty() {
            anyhow::bail!("invalid `Currency` name, was empty");
        }
        if precision > crate::types::fixed::FIXED_PRECISION {
            anyhow::bail!(
                "invalid `precision` greater than maximum {}, was {precision}",
                crate::types::fixed::FIXED_PRECISION
            );
        }
        Ok(Self {
            code: Ustr::from(code),
            precision,
            iso4217,
            name: Ustr::from(name),
            currency_type,
        })
    }

    /// Creates a new [`Currency`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `precision` is invalid, or `code`/`name` are empty.
    #[must_use]
    pub fn new(code: &str, precision: u8, iso4217: u16, name: &str, currency_type: CurrencyType) -> Self {
        Self::new_checked(code, precision, iso4217, name, currency_type)
            .expect(axiom_core::correctness::FAILED)
    }

    /// Returns whether this currency is a cryptocurrency or crypto token.
    #[must_use]
    pub fn is_crypto(&self) -> bool {
        self.currency_type == CurrencyType::Crypto
    }

    /// Returns whether this currency is fiat issued by a government.
    #[must_use]
    pub fn is_fiat(&self) -> bool {
        self.currency_type == CurrencyType::Fiat
    }

    /// Registers a custom currency into the built-in lookup table so subsequent
    /// [`Currency::from_str`] calls resolve it.
    pub fn register(currency: Self) {
        let mut map = crate::currencies::CURRENCY_MAP
            .lock()
            .expect(axiom_core::correctness::FAILED);
        map.insert(currency.code.to_string(), currency);
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        crate::currencies::CURRENCY_MAP
            .lock()
            .expect(axiom_core::correctness::FAILED)
            .get(value)
            .copied()
            .ok_or_else(|| format!("unknown currency code '{value}'"))
    }
}

impl From<&str> for Currency {
    fn from(value: &str) -> Self {
        Self::from_str(value).expect(axiom_core::correctness::FAILED)
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl Debug for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", stringify!(Currency), self.code)
    }
}
