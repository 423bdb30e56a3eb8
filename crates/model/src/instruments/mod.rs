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

//! Tradable instrument definitions.
//!
//! The matching engine and order book only need an instrument's identifier, tick/lot
//! quantization and currency denomination — broker-specific contract metadata (margin tables,
//! expiry calendars, option greeks) is a concern of the adapters that feed this core, not of the
//! core itself.

pub mod any;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

use serde::{Deserialize, Serialize};

pub use crate::instruments::any::InstrumentAny;
use crate::{
    identifiers::InstrumentId,
    types::{Currency, Money, Price, Quantity},
};

/// Represents a tradable instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// The instrument identifier.
    pub id: InstrumentId,
    /// The raw (native) symbol precision for display.
    pub raw_symbol: Option<ustr::Ustr>,
    /// The price decimal precision.
    pub price_precision: u8,
    /// The size decimal precision.
    pub size_precision: u8,
    /// The minimum price increment (tick size).
    pub price_increment: Price,
    /// The minimum size increment (lot size).
    pub size_increment: Quantity,
    /// The contract multiplier applied to price × size when computing notional value.
    pub multiplier: Quantity,
    /// The currency in which the instrument is quoted.
    pub quote_currency: Currency,
    /// The currency the instrument settles in.
    pub settlement_currency: Currency,
    /// Whether positions in this instrument are inverse (settle in the base currency).
    pub is_inverse: bool,
    /// The maximum order quantity, if constrained.
    pub max_quantity: Option<Quantity>,
    /// The minimum order quantity, if constrained.
    pub min_quantity: Option<Quantity>,
    /// The maker commission rate applied as a fraction of notional value.
    pub maker_fee: rust_decimal::Decimal,
    /// The taker commission rate applied as a fraction of notional value.
    pub taker_fee: rust_decimal::Decimal,
    /// The initial margin rate applied as a fraction of notional value.
    pub margin_init: rust_decimal::Decimal,
    /// The maintenance margin rate applied as a fraction of notional value.
    pub margin_maint: rust_decimal::Decimal,
}

impl Instrument {
    /// Quantizes `price` to this instrument's price precision and tick size.
    #[must_use]
    pub fn make_price(&self, value: f64) -> Price {
        Price::new(value, self.price_precision)
    }

    /// Quantizes `size` to this instrument's size precision and lot size.
    #[must_use]
    pub fn make_qty(&self, value: f64) -> Quantity {
        Quantity::new(value, self.size_precision)
    }

    /// Returns the notional value of `price * qty * multiplier`, denominated in the quote
    /// currency (or settlement currency for inverse instruments).
    #[must_use]
    pub fn notional_value(&self, price: Price, qty: Quantity) -> Money {
        let value = price.as_f64() * qty.as_f64() * self.multiplier.as_f64();
        if self.is_inverse {
            Money::new(value, self.settlement_currency)
        } else {
            Money::new(value, self.quote_currency)
        }
    }

    /// Calculates the base-currency quantity represented by a quote-denominated `quantity` at
    /// `last_px`. Returns the quantity unchanged for non-inverse instruments.
    #[must_use]
    pub fn calculate_base_quantity(&self, quantity: Quantity, last_px: Price) -> Quantity {
        if self.is_inverse && last_px.is_positive() {
            Quantity::new(quantity.as_f64() / last_px.as_f64(), self.size_precision)
        } else {
            quantity
        }
    }
}
