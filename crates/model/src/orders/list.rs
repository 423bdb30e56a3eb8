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

//! A linked group of orders submitted together: an OCO pair or a bracket (entry, stop-loss,
//! take-profit).
//!
//! The matching engine never follows back-pointers between siblings — it looks them up by id
//! through the `order_list_id`/`linked_order_ids` side tables each order already carries.

use serde::{Deserialize, Serialize};

use crate::{
    identifiers::{InstrumentId, OrderListId, StrategyId, TraderId},
    orders::OrderAny,
};

/// A named group of orders that were submitted as a unit (OCO pair, bracket triple, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderList {
    pub id: OrderListId,
    pub trader_id: TraderId,
    pub strategy_id: StrategyId,
    pub instrument_id: InstrumentId,
    pub orders: Vec<OrderAny>,
}

impl OrderList {
    #[must_use]
    pub fn new(
        id: OrderListId,
        trader_id: TraderId,
        strategy_id: StrategyId,
        instrument_id: InstrumentId,
        orders: Vec<OrderAny>,
    ) -> Self {
        Self {
            id,
            trader_id,
            strategy_id,
            instrument_id,
            orders,
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&OrderAny> {
        self.orders.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
