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

use std::collections::BTreeMap;

use crate::{
    data::order::{BookOrder, OrderId},
    orderbook::level::{BookLevel, BookPrice},
    types::Price,
};

/// One side of an order book: an ordered sequence of price [`BookLevel`]s.
///
/// `reverse` records whether this ladder sorts its [`BookPrice`] keys descending (bids) or
/// ascending (asks); the actual ordering is carried by [`BookPrice`]'s `Ord` impl, so `top()` is
/// always the first entry of the underlying map regardless of side.
#[derive(Clone, Debug)]
pub struct Ladder {
    pub reverse: bool,
    pub levels: BTreeMap<BookPrice, BookLevel>,
}

impl Ladder {
    #[must_use]
    pub fn new(reverse: bool) -> Self {
        Self {
            reverse,
            levels: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, order: BookOrder) {
        self.levels
            .entry(order.to_book_price())
            .or_insert_with(|| BookLevel::new(order.to_book_price()))
            .add(order);
    }

    pub fn add_bulk(&mut self, orders: Vec<BookOrder>) {
        for order in orders {
            self.add(order);
        }
    }

    /// Locates the level holding `order.order_id` and replaces it in place.
    ///
    /// # Errors
    ///
    /// Returns an error if no level at `order`'s price holds that id.
    pub fn update(&mut self, order: BookOrder) -> anyhow::Result<()> {
        let key = order.to_book_price();
        let level = self
            .levels
            .get_mut(&key)
            .ok_or_else(|| anyhow::anyhow!("cannot update order {}: no level at this price", order.order_id))?;
        level.update(order)
    }

    /// Removes `order` from its level, pruning the level if it becomes empty.
    ///
    /// # Errors
    ///
    /// Returns an error if no level at `order`'s price holds that id.
    pub fn delete(&mut self, order: BookOrder) -> anyhow::Result<()> {
        let key = order.to_book_price();
        let level = self
            .levels
            .get_mut(&key)
            .ok_or_else(|| anyhow::anyhow!("cannot delete order {}: no level at this price", order.order_id))?;
        level.delete(order.order_id)?;
        if level.is_empty() {
            self.levels.remove(&key);
        }
        Ok(())
    }

    #[must_use]
    pub fn top(&self) -> Option<&BookLevel> {
        self.levels.values().next()
    }

    #[must_use]
    pub fn depth(&self, n: usize) -> Vec<&BookLevel> {
        self.levels.values().take(n).collect()
    }

    #[must_use]
    pub fn prices(&self) -> Vec<Price> {
        self.levels.keys().map(|p| p.value).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// Walks this ladder top-down, consuming depth until `qty` is filled or the ladder is
    /// exhausted, returning `(price, fill_qty)` slices in walk order.
    #[must_use]
    pub fn simulate_fills(&self, mut qty: f64) -> Vec<(Price, f64)> {
        let mut fills = Vec::new();
        for level in self.levels.values() {
            if qty <= 0.0 {
                break;
            }
            let available = level.size();
            let take = qty.min(available);
            if take > 0.0 {
                fills.push((level.price.value, take));
                qty -= take;
            }
        }
        fills
    }
}
