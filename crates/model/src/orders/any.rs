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

//! Type-erased order wrappers dispatched over the four supported order types.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::{Order, limit::LimitOrder, market::MarketOrder, stop_limit::StopLimitOrder, stop_market::StopMarketOrder};
use crate::enums::OrderType;

/// A type-erased order, one of the four order types this system supports.
#[enum_dispatch(Order)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OrderAny {
    Market(MarketOrder),
    Limit(LimitOrder),
    StopMarket(StopMarketOrder),
    StopLimit(StopLimitOrder),
}

impl OrderAny {
    /// Returns the concrete [`OrderType`] discriminant without going through the `Order` trait.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        match self {
            Self::Market(_) => OrderType::Market,
            Self::Limit(_) => OrderType::Limit,
            Self::StopMarket(_) => OrderType::StopMarket,
            Self::StopLimit(_) => OrderType::StopLimit,
        }
    }
}

/// An order that carries a limit price: a plain limit order, or a triggered stop-limit order.
#[enum_dispatch(Order)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LimitOrderAny {
    Limit(LimitOrder),
    StopLimit(StopLimitOrder),
}

/// An order that carries a trigger price: stop-market or stop-limit.
#[enum_dispatch(Order)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StopOrderAny {
    StopMarket(StopMarketOrder),
    StopLimit(StopLimitOrder),
}

/// An order resting in the order book awaiting a match: any order with a limit price.
#[enum_dispatch(Order)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PassiveOrderAny {
    Limit(LimitOrderAny),
    Stop(StopOrderAny),
}

impl TryFrom<OrderAny> for PassiveOrderAny {
    type Error = anyhow::Error;

    fn try_from(order: OrderAny) -> anyhow::Result<Self> {
        match order {
            OrderAny::Market(_) => anyhow::bail!("a market order cannot be a passive order"),
            OrderAny::Limit(o) => Ok(Self::Limit(LimitOrderAny::Limit(o))),
            OrderAny::StopMarket(o) => Ok(Self::Stop(StopOrderAny::StopMarket(o))),
            OrderAny::StopLimit(o) => Ok(Self::Stop(StopOrderAny::StopLimit(o))),
        }
    }
}

impl From<OrderAny> for PassiveOrderAny {
    /// # Panics
    ///
    /// Panics if `order` is a [`OrderAny::Market`] order, which has no resting representation.
    fn from(order: OrderAny) -> Self {
        order
            .try_into()
            .expect("market orders have no passive representation")
    }
}

impl From<LimitOrderAny> for OrderAny {
    fn from(order: LimitOrderAny) -> Self {
        match order {
            LimitOrderAny::Limit(o) => Self::Limit(o),
            LimitOrderAny::StopLimit(o) => Self::StopLimit(o),
        }
    }
}

impl From<StopOrderAny> for OrderAny {
    fn from(order: StopOrderAny) -> Self {
        match order {
            StopOrderAny::StopMarket(o) => Self::StopMarket(o),
            StopOrderAny::StopLimit(o) => Self::StopLimit(o),
        }
    }
}

impl From<PassiveOrderAny> for OrderAny {
    fn from(order: PassiveOrderAny) -> Self {
        match order {
            PassiveOrderAny::Limit(o) => o.into(),
            PassiveOrderAny::Stop(o) => o.into(),
        }
    }
}

impl PassiveOrderAny {
    /// Widens this order back to the full [`OrderAny`] enum.
    #[must_use]
    pub fn to_any(&self) -> OrderAny {
        self.clone().into()
    }
}
