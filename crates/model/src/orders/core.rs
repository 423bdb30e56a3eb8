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

//! Shared order state, folded from [`OrderEventAny`] values.

use std::collections::HashMap;

use axiom_core::UnixNanos;
use serde::{Deserialize, Serialize};

use crate::{
    enums::{
        ContingencyType, LiquiditySide, OrderSide, OrderStatus, OrderType, TimeInForce,
        TriggerType,
    },
    events::{OrderEventAny, OrderInitialized},
    identifiers::{
        AccountId, ClientOrderId, InstrumentId, OrderListId, PositionId, StrategyId, TradeId,
        TraderId, VenueOrderId,
    },
    types::{Currency, Money, Price, Quantity},
};

/// The mutable state shared by every concrete order type, built from an [`OrderInitialized`]
/// seed event and thereafter mutated only through [`OrderCore::apply`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderCore {
    pub trader_id: TraderId,
    pub strategy_id: StrategyId,
    pub instrument_id: InstrumentId,
    pub client_order_id: ClientOrderId,
    pub venue_order_id: Option<VenueOrderId>,
    pub position_id: Option<PositionId>,
    pub account_id: Option<AccountId>,
    pub last_trade_id: Option<TradeId>,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub time_in_force: TimeInForce,
    pub price: Option<Price>,
    pub trigger_price: Option<Price>,
    pub trigger_type: Option<TriggerType>,
    pub expire_time: Option<UnixNanos>,
    pub post_only: bool,
    pub reduce_only: bool,
    pub contingency_type: ContingencyType,
    pub order_list_id: Option<OrderListId>,
    pub linked_order_ids: Vec<ClientOrderId>,
    pub parent_order_id: Option<ClientOrderId>,
    pub exec_spawn_id: Option<ClientOrderId>,
    pub liquidity_side: Option<LiquiditySide>,
    pub status: OrderStatus,
    pub filled_qty: Quantity,
    pub avg_px: Option<f64>,
    pub commissions: HashMap<Currency, Money>,
    pub ts_init: UnixNanos,
    pub ts_last: UnixNanos,
    pub events: Vec<OrderEventAny>,
}

impl OrderCore {
    #[must_use]
    pub fn new(init: OrderInitialized) -> Self {
        let ts_init = init.ts_init;
        Self {
            trader_id: init.trader_id,
            strategy_id: init.strategy_id,
            instrument_id: init.instrument_id,
            client_order_id: init.client_order_id,
            venue_order_id: None,
            position_id: None,
            account_id: None,
            last_trade_id: None,
            side: init.order_side,
            order_type: init.order_type,
            quantity: init.quantity,
            time_in_force: init.time_in_force,
            price: init.price,
            trigger_price: init.trigger_price,
            trigger_type: init.trigger_type,
            expire_time: init.expire_time,
            post_only: init.post_only,
            reduce_only: init.reduce_only,
            contingency_type: init.contingency_type.unwrap_or_default(),
            order_list_id: init.order_list_id,
            linked_order_ids: init.linked_order_ids.unwrap_or_default(),
            parent_order_id: init.parent_order_id,
            exec_spawn_id: init.exec_spawn_id,
            liquidity_side: None,
            status: OrderStatus::Initialized,
            filled_qty: Quantity::zero(init.quantity.precision),
            avg_px: None,
            commissions: HashMap::new(),
            ts_init,
            ts_last: ts_init,
            events: vec![OrderEventAny::Initialized(init)],
        }
    }

    #[must_use]
    pub fn leaves_qty(&self) -> Quantity {
        self.quantity - self.filled_qty
    }

    /// Folds `event` into this order's state.
    ///
    /// # Errors
    ///
    /// Returns an error if `event` does not correspond to a legal transition from the order's
    /// current [`OrderStatus`].
    pub fn apply(&mut self, event: OrderEventAny) -> anyhow::Result<()> {
        match &event {
            OrderEventAny::Initialized(_) => {
                anyhow::bail!("cannot re-apply an `OrderInitialized` event")
            }
            OrderEventAny::Submitted(e) => {
                if self.status != OrderStatus::Initialized {
                    anyhow::bail!("invalid state transition to Submitted from {:?}", self.status);
                }
                self.status = OrderStatus::Submitted;
                self.account_id = Some(e.account_id);
                self.ts_last = e.ts_event;
            }
            OrderEventAny::Accepted(e) => {
                self.status = OrderStatus::Accepted;
                self.venue_order_id = Some(e.venue_order_id);
                self.account_id = Some(e.account_id);
                self.ts_last = e.ts_event;
            }
            OrderEventAny::Rejected(e) => {
                self.status = OrderStatus::Rejected;
                self.ts_last = e.ts_event;
            }
            OrderEventAny::Canceled(e) => {
                self.status = OrderStatus::Canceled;
                self.ts_last = e.ts_event;
            }
            OrderEventAny::Expired(e) => {
                self.status = OrderStatus::Expired;
                self.ts_last = e.ts_event;
            }
            OrderEventAny::Triggered(e) => {
                if self.status != OrderStatus::Accepted {
                    anyhow::bail!("invalid state transition to Triggered from {:?}", self.status);
                }
                self.status = OrderStatus::Triggered;
                self.ts_last = e.ts_event;
            }
            OrderEventAny::ModifyRejected(e) => {
                self.ts_last = e.ts_event;
            }
            OrderEventAny::CancelRejected(e) => {
                self.ts_last = e.ts_event;
            }
            OrderEventAny::Updated(e) => {
                self.quantity = e.quantity;
                if let Some(price) = e.price {
                    self.price = Some(price);
                }
                if let Some(trigger_price) = e.trigger_price {
                    self.trigger_price = Some(trigger_price);
                }
                if let Some(venue_order_id) = e.venue_order_id {
                    self.venue_order_id = Some(venue_order_id);
                }
                self.ts_last = e.ts_event;
            }
            OrderEventAny::Filled(e) => {
                if !matches!(
                    self.status,
                    OrderStatus::Accepted | OrderStatus::Triggered | OrderStatus::PartiallyFilled
                ) {
                    anyhow::bail!("invalid state transition to Filled from {:?}", self.status);
                }
                let new_filled = self.filled_qty + e.last_qty;
                let prior_notional = self.avg_px.unwrap_or(0.0) * self.filled_qty.as_f64();
                let fill_notional = e.last_px.as_f64() * e.last_qty.as_f64();
                self.avg_px = Some((prior_notional + fill_notional) / new_filled.as_f64());
                self.filled_qty = new_filled;
                self.venue_order_id = Some(e.venue_order_id);
                self.account_id = Some(e.account_id);
                self.last_trade_id = Some(e.trade_id);
                self.liquidity_side = Some(e.liquidity_side);
                self.position_id = e.position_id.or(self.position_id);
                if let Some(commission) = e.commission {
                    self.commissions
                        .entry(commission.currency)
                        .and_modify(|total| *total += commission)
                        .or_insert(commission);
                }
                self.status = if self.filled_qty == self.quantity {
                    OrderStatus::Filled
                } else {
                    OrderStatus::PartiallyFilled
                };
                self.ts_last = e.ts_event;
            }
        }
        self.events.push(event);
        Ok(())
    }
}
