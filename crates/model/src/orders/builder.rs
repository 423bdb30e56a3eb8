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

//! A fluent builder for constructing test orders across the four supported order types.

use axiom_core::UnixNanos;

use super::{LimitOrder, MarketOrder, Order, OrderAny, StopLimitOrder, StopMarketOrder};
use crate::{
    enums::{ContingencyType, OrderSide, OrderType, TimeInForce, TriggerType},
    events::{OrderEventAny, OrderInitialized},
    identifiers::{ClientOrderId, InstrumentId, stubs::{instrument_id_btc_usdt, strategy_id_ema_cross, trader_id}},
    types::{Price, Quantity},
};

/// Builds [`OrderAny`] values for tests, seeding an [`OrderInitialized`] event and optionally
/// fast-forwarding the order through submission and acceptance.
#[derive(Debug, Clone)]
pub struct OrderTestBuilder {
    order_type: OrderType,
    instrument_id: InstrumentId,
    side: OrderSide,
    quantity: Quantity,
    price: Option<Price>,
    trigger_price: Option<Price>,
    trigger_type: Option<TriggerType>,
    client_order_id: Option<ClientOrderId>,
    contingency_type: Option<ContingencyType>,
    linked_order_ids: Option<Vec<ClientOrderId>>,
    parent_order_id: Option<ClientOrderId>,
    exec_spawn_id: Option<ClientOrderId>,
    time_in_force: TimeInForce,
    reduce_only: bool,
    post_only: bool,
    expire_time: Option<UnixNanos>,
    submit: bool,
}

impl OrderTestBuilder {
    #[must_use]
    pub fn new(order_type: OrderType) -> Self {
        Self {
            order_type,
            instrument_id: instrument_id_btc_usdt(),
            side: OrderSide::Buy,
            quantity: Quantity::new(1.0, 0),
            price: None,
            trigger_price: None,
            trigger_type: None,
            client_order_id: None,
            contingency_type: None,
            linked_order_ids: None,
            parent_order_id: None,
            exec_spawn_id: None,
            time_in_force: TimeInForce::Gtc,
            reduce_only: false,
            post_only: false,
            expire_time: None,
            submit: false,
        }
    }

    pub fn instrument_id(&mut self, instrument_id: InstrumentId) -> &mut Self {
        self.instrument_id = instrument_id;
        self
    }

    pub fn side(&mut self, side: OrderSide) -> &mut Self {
        self.side = side;
        self
    }

    pub fn quantity(&mut self, quantity: Quantity) -> &mut Self {
        self.quantity = quantity;
        self
    }

    pub fn price(&mut self, price: Price) -> &mut Self {
        self.price = Some(price);
        self
    }

    pub fn trigger_price(&mut self, trigger_price: Price) -> &mut Self {
        self.trigger_price = Some(trigger_price);
        self
    }

    pub fn trigger_type(&mut self, trigger_type: TriggerType) -> &mut Self {
        self.trigger_type = Some(trigger_type);
        self
    }

    pub fn client_order_id(&mut self, client_order_id: ClientOrderId) -> &mut Self {
        self.client_order_id = Some(client_order_id);
        self
    }

    pub fn contingency_type(&mut self, contingency_type: ContingencyType) -> &mut Self {
        self.contingency_type = Some(contingency_type);
        self
    }

    pub fn linked_order_ids(&mut self, linked_order_ids: Vec<ClientOrderId>) -> &mut Self {
        self.linked_order_ids = Some(linked_order_ids);
        self
    }

    pub fn parent_order_id(&mut self, parent_order_id: ClientOrderId) -> &mut Self {
        self.parent_order_id = Some(parent_order_id);
        self
    }

    pub fn exec_spawn_id(&mut self, exec_spawn_id: ClientOrderId) -> &mut Self {
        self.exec_spawn_id = Some(exec_spawn_id);
        self
    }

    pub fn time_in_force(&mut self, time_in_force: TimeInForce) -> &mut Self {
        self.time_in_force = time_in_force;
        self
    }

    pub fn reduce_only(&mut self, reduce_only: bool) -> &mut Self {
        self.reduce_only = reduce_only;
        self
    }

    pub fn post_only(&mut self, post_only: bool) -> &mut Self {
        self.post_only = post_only;
        self
    }

    pub fn expire_time(&mut self, expire_time: UnixNanos) -> &mut Self {
        self.expire_time = Some(expire_time);
        self
    }

    /// Advances the built order through `Submitted` and `Accepted` before returning it.
    pub fn submit(&mut self, submit: bool) -> &mut Self {
        self.submit = submit;
        self
    }

    fn init(&self) -> OrderInitialized {
        OrderInitialized {
            trader_id: trader_id(),
            strategy_id: strategy_id_ema_cross(),
            instrument_id: self.instrument_id,
            client_order_id: self.client_order_id.unwrap_or_default(),
            order_side: self.side,
            order_type: self.order_type,
            quantity: self.quantity,
            time_in_force: self.time_in_force,
            post_only: self.post_only,
            reduce_only: self.reduce_only,
            price: self.price,
            trigger_price: self.trigger_price,
            trigger_type: self.trigger_type,
            expire_time: self.expire_time,
            contingency_type: self.contingency_type,
            linked_order_ids: self.linked_order_ids.clone(),
            parent_order_id: self.parent_order_id,
            exec_spawn_id: self.exec_spawn_id,
            ..Default::default()
        }
    }

    /// Builds the order, consuming this builder's configuration.
    ///
    /// # Panics
    ///
    /// Panics if [`submit`](Self::submit) was set and folding the `Submitted`/`Accepted` events
    /// into the freshly initialized order fails.
    #[must_use]
    pub fn build(&self) -> OrderAny {
        let init = self.init();
        let mut order = match self.order_type {
            OrderType::Market => OrderAny::Market(MarketOrder::new(init)),
            OrderType::Limit => OrderAny::Limit(LimitOrder::new(init)),
            OrderType::StopMarket => OrderAny::StopMarket(StopMarketOrder::new(init)),
            OrderType::StopLimit => OrderAny::StopLimit(StopLimitOrder::new(init)),
            other => panic!("unsupported order type for OrderTestBuilder: {other:?}"),
        };

        if self.submit {
            let account_id = crate::identifiers::stubs::account_id();
            order
                .apply(OrderEventAny::Submitted(crate::events::OrderSubmitted::new(
                    order.trader_id(),
                    order.strategy_id(),
                    order.instrument_id(),
                    order.client_order_id(),
                    account_id,
                    axiom_core::UUID4::new(),
                    UnixNanos::default(),
                    UnixNanos::default(),
                )))
                .expect("submitted event should apply to a freshly initialized order");
            order
                .apply(OrderEventAny::Accepted(crate::events::OrderAccepted::new(
                    order.trader_id(),
                    order.strategy_id(),
                    order.instrument_id(),
                    order.client_order_id(),
                    crate::identifiers::VenueOrderId::new("1"),
                    account_id,
                    axiom_core::UUID4::new(),
                    UnixNanos::default(),
                    UnixNanos::default(),
                    false,
                )))
                .expect("accepted event should apply to a submitted order");
        }

        order
    }
}
