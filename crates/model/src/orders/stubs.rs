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

//! Test fixtures for the four concrete order types.

use axiom_core::{UUID4, UnixNanos};
use rstest::fixture;

use super::{LimitOrder, MarketOrder, Order, OrderAny, StopLimitOrder, StopMarketOrder, builder::OrderTestBuilder};
use crate::{
    enums::{LiquiditySide, OrderType},
    events::{OrderAccepted, OrderEventAny, OrderFilled, OrderInitialized, OrderSubmitted},
    identifiers::{
        AccountId, PositionId, TradeId, VenueOrderId,
        stubs::{instrument_id_btc_usdt, strategy_id_ema_cross, trader_id},
    },
    instruments::InstrumentAny,
    types::{Money, Price, Quantity},
};

#[fixture]
pub fn market_order_buy() -> MarketOrder {
    let init = OrderInitialized {
        trader_id: trader_id(),
        strategy_id: strategy_id_ema_cross(),
        instrument_id: instrument_id_btc_usdt(),
        order_type: OrderType::Market,
        quantity: Quantity::new(1.0, 0),
        ..Default::default()
    };
    MarketOrder::new(init)
}

#[fixture]
pub fn limit_order_buy() -> LimitOrder {
    let init = OrderInitialized {
        trader_id: trader_id(),
        strategy_id: strategy_id_ema_cross(),
        instrument_id: instrument_id_btc_usdt(),
        order_type: OrderType::Limit,
        quantity: Quantity::new(1.0, 0),
        price: Some(Price::new(100.0, 2)),
        ..Default::default()
    };
    LimitOrder::new(init)
}

#[fixture]
pub fn stop_market_order_sell() -> StopMarketOrder {
    let init = OrderInitialized {
        trader_id: trader_id(),
        strategy_id: strategy_id_ema_cross(),
        instrument_id: instrument_id_btc_usdt(),
        order_type: OrderType::StopMarket,
        quantity: Quantity::new(1.0, 0),
        trigger_price: Some(Price::new(90.0, 2)),
        ..Default::default()
    };
    StopMarketOrder::new(init)
}

#[fixture]
pub fn stop_limit_order_sell() -> StopLimitOrder {
    let init = OrderInitialized {
        trader_id: trader_id(),
        strategy_id: strategy_id_ema_cross(),
        instrument_id: instrument_id_btc_usdt(),
        order_type: OrderType::StopLimit,
        quantity: Quantity::new(1.0, 0),
        price: Some(Price::new(89.5, 2)),
        trigger_price: Some(Price::new(90.0, 2)),
        ..Default::default()
    };
    StopLimitOrder::new(init)
}

/// Helpers that advance a freshly built [`OrderAny`] through its event-sourced lifecycle.
pub struct TestOrderStubs;

impl TestOrderStubs {
    /// Returns a clone of `order` folded through `Submitted` then `Accepted`.
    #[must_use]
    pub fn make_accepted_order(order: &OrderAny) -> OrderAny {
        let mut order = order.clone();
        let account_id = order.account_id().unwrap_or_else(|| AccountId::new("SIM-001"));
        order
            .apply(OrderEventAny::Submitted(OrderSubmitted::new(
                order.trader_id(),
                order.strategy_id(),
                order.instrument_id(),
                order.client_order_id(),
                account_id,
                UUID4::new(),
                UnixNanos::default(),
                UnixNanos::default(),
            )))
            .expect("Submitted should apply to an Initialized order");
        order
            .apply(OrderEventAny::Accepted(OrderAccepted::new(
                order.trader_id(),
                order.strategy_id(),
                order.instrument_id(),
                order.client_order_id(),
                VenueOrderId::new("1"),
                account_id,
                UUID4::new(),
                UnixNanos::default(),
                UnixNanos::default(),
                false,
            )))
            .expect("Accepted should apply to a Submitted order");
        order
    }

    /// Returns a clone of `order`, accepted then filled in full at `instrument`'s price.
    #[must_use]
    pub fn make_filled_order(
        order: &OrderAny,
        instrument: &InstrumentAny,
        liquidity_side: LiquiditySide,
    ) -> OrderAny {
        let mut order = Self::make_accepted_order(order);
        let fill = TestOrderEventStubs::filled(
            &order,
            instrument,
            None,
            None,
            None,
            None,
            Some(liquidity_side),
            None,
            None,
            None,
        );
        order
            .apply(fill)
            .expect("Filled should apply to an Accepted order");
        order
    }
}

/// Builds [`OrderEventAny`] fill events for tests, defaulting unset fields from the order and
/// instrument being filled.
pub struct TestOrderEventStubs;

impl TestOrderEventStubs {
    /// Builds an `OrderFilled` event for `order`, defaulting any field left `None`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn filled(
        order: &OrderAny,
        instrument: &InstrumentAny,
        trade_id: Option<TradeId>,
        position_id: Option<PositionId>,
        last_px: Option<Price>,
        last_qty: Option<Quantity>,
        liquidity_side: Option<LiquiditySide>,
        commission: Option<Money>,
        ts_filled_ns: Option<UnixNanos>,
        account_id: Option<AccountId>,
    ) -> OrderEventAny {
        let last_qty = last_qty.unwrap_or_else(|| order.leaves_qty());
        let last_px = last_px.unwrap_or_else(|| order.price().unwrap_or(instrument.price_increment));
        let ts = ts_filled_ns.unwrap_or_default();
        OrderEventAny::Filled(OrderFilled::new(
            order.trader_id(),
            order.strategy_id(),
            order.instrument_id(),
            order.client_order_id(),
            order
                .venue_order_id()
                .unwrap_or_else(|| VenueOrderId::new("1")),
            account_id
                .or_else(|| order.account_id())
                .unwrap_or_else(|| AccountId::new("SIM-001")),
            trade_id.unwrap_or_else(|| TradeId::new("1")),
            order.side(),
            order.order_type(),
            last_qty,
            last_px,
            instrument.quote_currency,
            liquidity_side.unwrap_or(LiquiditySide::Taker),
            UUID4::new(),
            ts,
            ts,
            false,
            position_id,
            commission,
        ))
    }
}

/// Generates batches of test orders across a cartesian product of venues and instruments.
#[derive(Debug, Clone, Default)]
pub struct TestOrdersGenerator {
    order_type: Option<OrderType>,
    venues: Vec<(crate::identifiers::Venue, usize)>,
    orders_per_instrument: usize,
}

impl TestOrdersGenerator {
    #[must_use]
    pub fn new(order_type: OrderType) -> Self {
        Self {
            order_type: Some(order_type),
            venues: Vec::new(),
            orders_per_instrument: 1,
        }
    }

    pub fn add_venue_and_total_instruments(
        &mut self,
        venue: crate::identifiers::Venue,
        total_instruments: usize,
    ) -> &mut Self {
        self.venues.push((venue, total_instruments));
        self
    }

    pub fn set_orders_per_instrument(&mut self, orders_per_instrument: usize) -> &mut Self {
        self.orders_per_instrument = orders_per_instrument;
        self
    }

    /// Builds one order per `(venue, instrument, order index)` combination, each instrument
    /// identified as `SYMBOL-{n}.{VENUE}`.
    #[must_use]
    pub fn build(&self) -> Vec<OrderAny> {
        let order_type = self.order_type.unwrap_or(OrderType::Limit);
        let mut orders = Vec::new();
        for (venue, total_instruments) in &self.venues {
            for i in 0..*total_instruments {
                let instrument_id = crate::identifiers::InstrumentId::from(
                    format!("SYMBOL-{i}.{venue}").as_str(),
                );
                for _ in 0..self.orders_per_instrument {
                    let mut builder = OrderTestBuilder::new(order_type);
                    builder.instrument_id(instrument_id);
                    if matches!(order_type, OrderType::Limit | OrderType::StopLimit) {
                        builder.price(Price::new(100.0, 2));
                    }
                    if matches!(order_type, OrderType::StopMarket | OrderType::StopLimit) {
                        builder.trigger_price(Price::new(100.0, 2));
                    }
                    orders.push(builder.build());
                }
            }
        }
        orders
    }
}
