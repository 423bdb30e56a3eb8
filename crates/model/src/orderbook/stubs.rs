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

//! Test fixtures for order book scenarios.

use rstest::fixture;

use crate::{
    data::order::BookOrder,
    enums::{BookType, OrderSide},
    identifiers::stubs::instrument_id_btc_usdt,
    orderbook::OrderBook,
    types::{Price, Quantity},
};

#[fixture]
pub fn empty_l2_book() -> OrderBook {
    OrderBook::new(instrument_id_btc_usdt(), BookType::L2_MBP)
}

#[fixture]
pub fn empty_l1_book() -> OrderBook {
    OrderBook::new(instrument_id_btc_usdt(), BookType::L1_MBP)
}

#[fixture]
pub fn stacked_l2_book() -> OrderBook {
    let mut book = OrderBook::new(instrument_id_btc_usdt(), BookType::L2_MBP);
    let bids = [(99.0, 3.0), (98.0, 5.0), (97.0, 8.0)];
    let asks = [(100.0, 2.0), (101.0, 3.0), (102.0, 6.0)];
    for (i, (price, size)) in bids.iter().enumerate() {
        book.add(
            BookOrder::new(OrderSide::Buy, Price::new(*price, 2), Quantity::new(*size, 0), i as u64),
            i as u64 + 1,
            (i as u64 + 1).into(),
        )
        .unwrap();
    }
    for (i, (price, size)) in asks.iter().enumerate() {
        book.add(
            BookOrder::new(OrderSide::Sell, Price::new(*price, 2), Quantity::new(*size, 0), i as u64 + 100),
            i as u64 + 10,
            (i as u64 + 10).into(),
        )
        .unwrap();
    }
    book
}
