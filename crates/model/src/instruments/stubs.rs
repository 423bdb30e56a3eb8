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

//! Test fixtures for instruments.

use rstest::fixture;
use rust_decimal_macros::dec;

use super::Instrument;
use crate::{
    identifiers::InstrumentId,
    types::{Currency, Price, Quantity},
};

#[fixture]
pub fn currency_pair_btcusdt() -> Instrument {
    Instrument {
        id: InstrumentId::from("BTCUSDT.BINANCE"),
        raw_symbol: Some(ustr::Ustr::from("BTCUSDT")),
        price_precision: 2,
        size_precision: 6,
        price_increment: Price::new(0.01, 2),
        size_increment: Quantity::new(0.000_001, 6),
        multiplier: Quantity::new(1.0, 0),
        quote_currency: Currency::USDT(),
        settlement_currency: Currency::USDT(),
        is_inverse: false,
        max_quantity: Some(Quantity::new(9000.0, 6)),
        min_quantity: Some(Quantity::new(0.000_001, 6)),
        maker_fee: dec!(0.0001),
        taker_fee: dec!(0.0004),
        margin_init: dec!(0.01),
        margin_maint: dec!(0.005),
    }
}

#[fixture]
pub fn audusd_sim() -> Instrument {
    Instrument {
        id: InstrumentId::from("AUD/USD.SIM"),
        raw_symbol: Some(ustr::Ustr::from("AUD/USD")),
        price_precision: 5,
        size_precision: 0,
        price_increment: Price::new(0.000_01, 5),
        size_increment: Quantity::new(1.0, 0),
        multiplier: Quantity::new(1.0, 0),
        quote_currency: Currency::USD(),
        settlement_currency: Currency::USD(),
        is_inverse: false,
        max_quantity: Some(Quantity::new(100_000_000.0, 0)),
        min_quantity: Some(Quantity::new(1.0, 0)),
        maker_fee: dec!(0.000_02),
        taker_fee: dec!(0.000_02),
        margin_init: dec!(0.03),
        margin_maint: dec!(0.015),
    }
}

#[fixture]
pub fn xbtusd_bitmex() -> Instrument {
    Instrument {
        id: InstrumentId::from("BTC/USD.BITMEX"),
        raw_symbol: Some(ustr::Ustr::from("XBTUSD")),
        price_precision: 1,
        size_precision: 0,
        price_increment: Price::new(0.5, 1),
        size_increment: Quantity::new(1.0, 0),
        multiplier: Quantity::new(1.0, 0),
        quote_currency: Currency::USD(),
        settlement_currency: Currency::BTC(),
        is_inverse: true,
        max_quantity: None,
        min_quantity: Some(Quantity::new(1.0, 0)),
        maker_fee: dec!(-0.000_25),
        taker_fee: dec!(0.000_75),
        margin_init: dec!(0.01),
        margin_maint: dec!(0.005),
    }
}

#[fixture]
pub fn usdjpy_idealpro() -> Instrument {
    Instrument {
        id: InstrumentId::from("USD/JPY.IDEALPRO"),
        raw_symbol: Some(ustr::Ustr::from("USD/JPY")),
        price_precision: 3,
        size_precision: 0,
        price_increment: Price::new(0.001, 3),
        size_increment: Quantity::new(1.0, 0),
        multiplier: Quantity::new(1.0, 0),
        quote_currency: Currency::JPY(),
        settlement_currency: Currency::JPY(),
        is_inverse: false,
        max_quantity: Some(Quantity::new(100_000_000.0, 0)),
        min_quantity: Some(Quantity::new(1.0, 0)),
        maker_fee: dec!(0.000_02),
        taker_fee: dec!(0.000_02),
        margin_init: dec!(0.03),
        margin_maint: dec!(0.015),
    }
}

#[fixture]
pub fn crypto_perpetual_ethusdt() -> Instrument {
    Instrument {
        id: InstrumentId::from("ETHUSDT-PERP.BINANCE"),
        raw_symbol: Some(ustr::Ustr::from("ETHUSDT")),
        price_precision: 2,
        size_precision: 3,
        price_increment: Price::new(0.01, 2),
        size_increment: Quantity::new(0.001, 3),
        multiplier: Quantity::new(1.0, 0),
        quote_currency: Currency::USDT(),
        settlement_currency: Currency::ETH(),
        is_inverse: true,
        max_quantity: Some(Quantity::new(10_000.0, 3)),
        min_quantity: Some(Quantity::new(0.001, 3)),
        maker_fee: dec!(0.0002),
        taker_fee: dec!(0.0004),
        margin_init: dec!(0.01),
        margin_maint: dec!(0.005),
    }
}

#[fixture]
pub fn equity_aapl() -> Instrument {
    Instrument {
        id: InstrumentId::from("AAPL.NASDAQ"),
        raw_symbol: Some(ustr::Ustr::from("AAPL")),
        price_precision: 2,
        size_precision: 0,
        price_increment: Price::new(0.01, 2),
        size_increment: Quantity::new(1.0, 0),
        multiplier: Quantity::new(1.0, 0),
        quote_currency: Currency::USD(),
        settlement_currency: Currency::USD(),
        is_inverse: false,
        max_quantity: None,
        min_quantity: Some(Quantity::new(1.0, 0)),
        maker_fee: dec!(0.0),
        taker_fee: dec!(0.0),
        margin_init: dec!(0.5),
        margin_maint: dec!(0.25),
    }
}
