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

use std::collections::HashMap;

use axiom_core::UnixNanos;
use serde::{Deserialize, Serialize};

use super::{Order, core::OrderCore};
use crate::{
    enums::{
        ContingencyType, LiquiditySide, OrderSide, OrderStatus, OrderType, TimeInForce,
    },
    events::{OrderEventAny, OrderInitialized},
    identifiers::{
        AccountId, ClientOrderId, InstrumentId, OrderListId, PositionId, StrategyId, TradeId,
        TraderId, VenueOrderId,
    },
    types::{Currency, Money, Price, Quantity},
};

/// An order to buy or sell an instrument at a specified price, or better.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimitOrder {
    core: OrderCore,
}

impl LimitOrder {
    #[must_use]
    pub fn new(init: OrderInitialized) -> Self {
        assert_eq!(init.order_type, OrderType::Limit, "initializer is not for a limit order");
        assert!(init.price.is_some(), "limit order requires a price");
        Self {
            core: OrderCore::new(init),
        }
    }
}

impl Order for LimitOrder {
    fn trader_id(&self) -> TraderId {
        self.core.trader_id
    }
    fn strategy_id(&self) -> StrategyId {
        self.core.strategy_id
    }
    fn instrument_id(&self) -> InstrumentId {
        self.core.instrument_id
    }
    fn client_order_id(&self) -> ClientOrderId {
        self.core.client_order_id
    }
    fn venue_order_id(&self) -> Option<VenueOrderId> {
        self.core.venue_order_id
    }
    fn position_id(&self) -> Option<PositionId> {
        self.core.position_id
    }
    fn account_id(&self) -> Option<AccountId> {
        self.core.account_id
    }
    fn last_trade_id(&self) -> Option<TradeId> {
        self.core.last_trade_id
    }
    fn side(&self) -> OrderSide {
        self.core.side
    }
    fn order_type(&self) -> OrderType {
        self.core.order_type
    }
    fn quantity(&self) -> Quantity {
        self.core.quantity
    }
    fn time_in_force(&self) -> TimeInForce {
        self.core.time_in_force
    }
    fn status(&self) -> OrderStatus {
        self.core.status
    }
    fn price(&self) -> Option<Price> {
        self.core.price
    }
    fn trigger_price(&self) -> Option<Price> {
        None
    }
    fn expire_time(&self) -> Option<UnixNanos> {
        self.core.expire_time
    }
    fn is_post_only(&self) -> bool {
        self.core.post_only
    }
    fn is_reduce_only(&self) -> bool {
        self.core.reduce_only
    }
    fn contingency_type(&self) -> ContingencyType {
        self.core.contingency_type
    }
    fn order_list_id(&self) -> Option<OrderListId> {
        self.core.order_list_id
    }
    fn linked_order_ids(&self) -> Option<&[ClientOrderId]> {
        if self.core.linked_order_ids.is_empty() {
            None
        } else {
            Some(&self.core.linked_order_ids)
        }
    }
    fn parent_order_id(&self) -> Option<ClientOrderId> {
        self.core.parent_order_id
    }

    fn exec_spawn_id(&self) -> Option<ClientOrderId> {
        self.core.exec_spawn_id
    }

    fn liquidity_side(&self) -> Option<LiquiditySide> {
        self.core.liquidity_side
    }

    fn set_liquidity_side(&mut self, liquidity_side: LiquiditySide) {
        self.core.liquidity_side = Some(liquidity_side);
    }
    fn filled_qty(&self) -> Quantity {
        self.core.filled_qty
    }
    fn leaves_qty(&self) -> Quantity {
        self.core.leaves_qty()
    }
    fn avg_px(&self) -> Option<f64> {
        self.core.avg_px
    }
    fn commissions(&self) -> &HashMap<Currency, Money> {
        &self.core.commissions
    }
    fn ts_init(&self) -> UnixNanos {
        self.core.ts_init
    }
    fn ts_last(&self) -> UnixNanos {
        self.core.ts_last
    }
    fn events(&self) -> &[OrderEventAny] {
        &self.core.events
    }

    fn apply(&mut self, event: OrderEventAny) -> anyhow::Result<()> {
        self.core.apply(event)
    }
}
