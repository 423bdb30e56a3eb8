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

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::{
    data::order::{BookOrder, OrderId},
    enums::OrderSideSpecified,
    types::Price,
};

/// A price keyed by the side it belongs to, ordered so that the best price for that side always
/// sorts first: descending for bids, ascending for asks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookPrice {
    pub value: Price,
    pub side: OrderSideSpecified,
}

impl BookPrice {
    #[must_use]
    pub const fn new(value: Price, side: OrderSideSpecified) -> Self {
        Self { value, side }
    }
}

impl PartialOrd for BookPrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BookPrice {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.side {
            OrderSideSpecified::Buy => other.value.cmp(&self.value),
            OrderSideSpecified::Sell => self.value.cmp(&other.value),
        }
    }
}

/// All orders resting at one price.
#[derive(Clone, Debug)]
pub struct BookLevel {
    pub price: BookPrice,
    pub orders: IndexMap<OrderId, BookOrder>,
}

impl BookLevel {
    #[must_use]
    pub fn new(price: BookPrice) -> Self {
        Self {
            price,
            orders: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn from_order(order: BookOrder) -> Self {
        let mut level = Self::new(order.to_book_price());
        level.add(order);
        level
    }

    pub fn add(&mut self, order: BookOrder) {
        self.orders.insert(order.order_id, order);
    }

    pub fn add_bulk(&mut self, orders: Vec<BookOrder>) {
        for order in orders {
            self.add(order);
        }
    }

    /// Replaces an existing order in place, preserving insertion-order priority.
    ///
    /// # Errors
    ///
    /// Returns an error if no order with `order.order_id` is resting at this level.
    pub fn update(&mut self, order: BookOrder) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.orders.contains_key(&order.order_id),
            "cannot update order {}: not found at this level",
            order.order_id
        );
        self.orders.insert(order.order_id, order);
        Ok(())
    }

    /// Removes the order with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if no order with `order_id` is resting at this level.
    pub fn delete(&mut self, order_id: OrderId) -> anyhow::Result<BookOrder> {
        self.orders
            .shift_remove(&order_id)
            .ok_or_else(|| anyhow::anyhow!("cannot delete order {order_id}: not found at this level"))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Total size resting at this level.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.orders.values().map(|o| o.size.as_f64()).sum()
    }

    /// Total notional exposure (price × size) resting at this level.
    #[must_use]
    pub fn exposure(&self) -> f64 {
        self.orders.values().map(BookOrder::exposure).sum()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::enums::OrderSide;

    fn order(side: OrderSide, price: f64, size: f64, id: OrderId) -> BookOrder {
        BookOrder::new(side, Price::new(price, 2), crate::types::Quantity::new(size, 0), id)
    }

    #[rstest]
    fn test_best_bid_price_orders_descending() {
        let higher = BookPrice::new(Price::new(101.0, 2), OrderSideSpecified::Buy);
        let lower = BookPrice::new(Price::new(100.0, 2), OrderSideSpecified::Buy);
        assert!(higher < lower);
    }

    #[rstest]
    fn test_best_ask_price_orders_ascending() {
        let higher = BookPrice::new(Price::new(101.0, 2), OrderSideSpecified::Sell);
        let lower = BookPrice::new(Price::new(100.0, 2), OrderSideSpecified::Sell);
        assert!(lower < higher);
    }

    #[rstest]
    fn test_level_update_replaces_in_place() {
        let mut level = BookLevel::from_order(order(OrderSide::Buy, 100.0, 5.0, 1));
        level.update(order(OrderSide::Buy, 100.0, 7.0, 1)).unwrap();
        assert_eq!(level.len(), 1);
        assert_eq!(level.size(), 7.0);
    }

    #[rstest]
    fn test_level_update_missing_id_fails() {
        let mut level = BookLevel::from_order(order(OrderSide::Buy, 100.0, 5.0, 1));
        assert!(level.update(order(OrderSide::Buy, 100.0, 7.0, 2)).is_err());
    }
}
