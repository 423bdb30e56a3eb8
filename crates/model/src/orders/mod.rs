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

//! Order types and the event-sourced order lifecycle.
//!
//! An order is reconstructed (or created live) from an [`OrderInitialized`] seed event and
//! mutated only by folding subsequent [`OrderEventAny`] values over it via [`Order::apply`] — the
//! same event-sourcing discipline used by [`Position`](crate::position::Position) and
//! `Account`(crate::accounts::Account).

pub mod any;
pub mod core;
pub mod limit;
pub mod list;
pub mod market;
pub mod stop_limit;
pub mod stop_market;

#[cfg(any(test, feature = "stubs"))]
pub mod builder;
#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

use std::fmt::Debug;

use enum_dispatch::enum_dispatch;
use axiom_core::UnixNanos;

pub use crate::orders::{
    any::{LimitOrderAny, OrderAny, PassiveOrderAny, StopOrderAny},
    limit::LimitOrder,
    list::OrderList,
    market::MarketOrder,
    stop_limit::StopLimitOrder,
    stop_market::StopMarketOrder,
};
use crate::{
    enums::{
        ContingencyType, LiquiditySide, OrderSide, OrderSideSpecified, OrderStatus, OrderType,
        TimeInForce,
    },
    events::OrderEventAny,
    identifiers::{
        AccountId, ClientOrderId, InstrumentId, OrderListId, PositionId, StrategyId, TradeId,
        TraderId, VenueOrderId,
    },
    types::{Currency, Money, Price, Quantity},
};

/// Common behavior shared by every concrete order type.
///
/// Implementors hold an [`core::OrderCore`] and delegate most accessors to it; type-specific
/// methods (`price`, `trigger_price`) return `None` where the concept does not apply (e.g. a
/// market order has no limit price).
#[enum_dispatch]
pub trait Order: 'static + Send + Debug {
    fn trader_id(&self) -> TraderId;
    fn strategy_id(&self) -> StrategyId;
    fn instrument_id(&self) -> InstrumentId;
    fn client_order_id(&self) -> ClientOrderId;
    fn venue_order_id(&self) -> Option<VenueOrderId>;
    fn position_id(&self) -> Option<PositionId>;
    fn account_id(&self) -> Option<AccountId>;
    fn last_trade_id(&self) -> Option<TradeId>;
    fn side(&self) -> OrderSide;
    fn order_type(&self) -> OrderType;
    fn quantity(&self) -> Quantity;
    fn time_in_force(&self) -> TimeInForce;
    fn status(&self) -> OrderStatus;
    /// The order's limit price, if it has one (LIMIT, STOP_LIMIT).
    fn price(&self) -> Option<Price>;
    /// The order's trigger price, if it has one (STOP_MARKET, STOP_LIMIT).
    fn trigger_price(&self) -> Option<Price>;
    fn expire_time(&self) -> Option<UnixNanos>;
    fn is_post_only(&self) -> bool;
    fn is_reduce_only(&self) -> bool;
    fn contingency_type(&self) -> ContingencyType;
    fn order_list_id(&self) -> Option<OrderListId>;
    fn linked_order_ids(&self) -> Option<&[ClientOrderId]>;
    fn parent_order_id(&self) -> Option<ClientOrderId>;
    /// The first order ID of the execution spawn this order belongs to, if any.
    fn exec_spawn_id(&self) -> Option<ClientOrderId>;
    /// The liquidity side of this order's most recent fill, if it has been filled.
    fn liquidity_side(&self) -> Option<LiquiditySide>;
    /// Sets the liquidity side the matching engine determined for the next fill.
    fn set_liquidity_side(&mut self, liquidity_side: LiquiditySide);
    fn filled_qty(&self) -> Quantity;
    fn leaves_qty(&self) -> Quantity;
    fn avg_px(&self) -> Option<f64>;
    fn commissions(&self) -> &std::collections::HashMap<Currency, Money>;
    fn ts_init(&self) -> UnixNanos;
    fn ts_last(&self) -> UnixNanos;
    fn events(&self) -> &[OrderEventAny];

    /// Returns whether this order is still actively working at the venue.
    fn is_open(&self) -> bool {
        matches!(
            self.status(),
            OrderStatus::Accepted | OrderStatus::Triggered | OrderStatus::PartiallyFilled
        )
    }

    /// Returns whether this order has reached a terminal state.
    fn is_closed(&self) -> bool {
        matches!(
            self.status(),
            OrderStatus::Rejected
                | OrderStatus::Canceled
                | OrderStatus::Expired
                | OrderStatus::Filled
                | OrderStatus::Denied
        )
    }

    /// Alias for [`Order::side`], matching the naming used by the matching engine.
    fn order_side(&self) -> OrderSide {
        self.side()
    }

    fn is_buy(&self) -> bool {
        self.side() == OrderSide::Buy
    }

    fn is_sell(&self) -> bool {
        self.side() == OrderSide::Sell
    }

    /// Returns this order's side with the [`OrderSide::NoOrderSide`] case excluded.
    fn order_side_specified(&self) -> OrderSideSpecified {
        self.side().as_specified()
    }

    /// Returns whether this order has not yet been sent to (or acknowledged by) a trading venue.
    fn is_active_local(&self) -> bool {
        matches!(
            self.status(),
            OrderStatus::Initialized | OrderStatus::Emulated | OrderStatus::Released
        )
    }

    /// Returns whether this order is awaiting a venue response to a prior request.
    fn is_inflight(&self) -> bool {
        matches!(
            self.status(),
            OrderStatus::Submitted | OrderStatus::PendingUpdate | OrderStatus::PendingCancel
        )
    }

    /// Returns whether this order type rests on the book rather than matching immediately.
    fn is_passive(&self) -> bool {
        self.order_type() != OrderType::Market
    }

    /// Returns whether this order's trigger has fired on the venue, or `None` if this order type
    /// has no trigger price.
    fn is_triggered(&self) -> Option<bool> {
        self.trigger_price()
            .map(|_| self.status() == OrderStatus::Triggered)
    }

    /// Folds `event` into this order's state.
    ///
    /// # Errors
    ///
    /// Returns an error if `event` is not applicable to the order's current status (e.g. a fill
    /// event arriving for an order that has not yet been accepted).
    fn apply(&mut self, event: OrderEventAny) -> anyhow::Result<()>;
}
