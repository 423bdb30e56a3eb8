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

use axiom_core::UnixNanos;

use crate::{
    data::{
        order::{BookOrder, OrderId},
        quote::QuoteTick,
        trade::TradeTick,
        {OrderBookDelta, OrderBookDeltas},
    },
    enums::{AggressorSide, BookAction, BookType, OrderSide, OrderSideSpecified},
    identifiers::InstrumentId,
    orderbook::ladder::Ladder,
    types::{Price, Quantity},
};

/// A price-time-priority limit order book admitting snapshots and deltas at L1/L2/L3 granularity.
///
/// The book never changes its [`BookType`] after construction: `book_type` is read once per
/// mutation to select the L1/L2/L3 behavior rather than being modeled as separate subclasses.
#[derive(Clone, Debug)]
pub struct OrderBook {
    pub instrument_id: InstrumentId,
    pub book_type: BookType,
    pub bids: Ladder,
    pub asks: Ladder,
    pub sequence: u64,
    pub ts_last: UnixNanos,
    pub update_count: u64,
}

impl OrderBook {
    #[must_use]
    pub fn new(instrument_id: InstrumentId, book_type: BookType) -> Self {
        Self {
            instrument_id,
            book_type,
            bids: Ladder::new(true),
            asks: Ladder::new(false),
            sequence: 0,
            ts_last: UnixNanos::default(),
            update_count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.sequence = 0;
        self.ts_last = UnixNanos::default();
        self.update_count = 0;
    }

    fn ladder_mut(&mut self, side: OrderSide) -> &mut Ladder {
        match side {
            OrderSide::Buy => &mut self.bids,
            OrderSide::Sell | OrderSide::NoOrderSide => &mut self.asks,
        }
    }

    /// Adds a resting order to the relevant side.
    ///
    /// # Errors
    ///
    /// Returns an error for [`BookType::L1_MBP`], which does not support discrete order adds.
    pub fn add(&mut self, mut order: BookOrder, sequence: u64, ts_event: UnixNanos) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.book_type != BookType::L1_MBP,
            "`add` is not supported for an L1_MBP book; use `update` or `update_top`"
        );
        if self.book_type == BookType::L2_MBP {
            order.order_id = l2_order_id(order.price, order.side);
            // One order per level: replace any existing resting order at this price outright.
            let _ = self.ladder_mut(order.side).delete(order);
        }
        self.ladder_mut(order.side).add(order);
        self.sequence = sequence;
        self.ts_last = ts_event;
        self.update_count += 1;
        Ok(())
    }

    /// Updates (or, for L1/L2, replaces) the order at its price.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found (L3), except L1/L2 which pre-process the id so
    /// the call always succeeds by inserting when absent.
    pub fn update(&mut self, mut order: BookOrder, sequence: u64, ts_event: UnixNanos) -> anyhow::Result<()> {
        match self.book_type {
            BookType::L1_MBP => {
                order.order_id = l1_order_id(order.side);
                self.absorb_crossed_feed(order.side, order.price);
                let ladder = self.ladder_mut(order.side);
                ladder.clear();
                ladder.add(order);
            }
            BookType::L2_MBP => {
                order.order_id = l2_order_id(order.price, order.side);
                let ladder = self.ladder_mut(order.side);
                let _ = ladder.delete(order);
                ladder.add(order);
            }
            BookType::L3_MBO => {
                self.ladder_mut(order.side).update(order)?;
            }
        }
        self.sequence = sequence;
        self.ts_last = ts_event;
        self.update_count += 1;
        Ok(())
    }

    /// Removes an order from the book.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be located.
    pub fn delete(&mut self, order: BookOrder, sequence: u64, ts_event: UnixNanos) -> anyhow::Result<()> {
        let order = match self.book_type {
            BookType::L1_MBP => BookOrder {
                order_id: l1_order_id(order.side),
                ..order
            },
            BookType::L2_MBP => BookOrder {
                order_id: l2_order_id(order.price, order.side),
                ..order
            },
            BookType::L3_MBO => order,
        };
        self.ladder_mut(order.side).delete(order)?;
        self.sequence = sequence;
        self.ts_last = ts_event;
        self.update_count += 1;
        Ok(())
    }

    pub fn clear(&mut self, sequence: u64, ts_event: UnixNanos) {
        self.bids.clear();
        self.asks.clear();
        self.sequence = sequence;
        self.ts_last = ts_event;
        self.update_count += 1;
    }

    pub fn clear_bids(&mut self, sequence: u64, ts_event: UnixNanos) {
        self.bids.clear();
        self.sequence = sequence;
        self.ts_last = ts_event;
    }

    pub fn clear_asks(&mut self, sequence: u64, ts_event: UnixNanos) {
        self.asks.clear();
        self.sequence = sequence;
        self.ts_last = ts_event;
    }

    /// Applies one delta, requiring its `level` to exactly match this book's.
    ///
    /// # Errors
    ///
    /// Returns an error if `level != self.book_type`.
    pub fn apply_delta(&mut self, delta: &OrderBookDelta, level: BookType) -> anyhow::Result<()> {
        // Explicit equality per the book-level precondition; NOT a constructor-style check.
        anyhow::ensure!(
            level == self.book_type,
            "delta level {level:?} does not match book type {:?}",
            self.book_type
        );
        match delta.action {
            BookAction::Add => self.add(delta.order, delta.sequence, delta.ts_event)?,
            BookAction::Update => self.update(delta.order, delta.sequence, delta.ts_event)?,
            BookAction::Delete => self.delete(delta.order, delta.sequence, delta.ts_event)?,
            BookAction::Clear => self.clear(delta.sequence, delta.ts_event),
        }
        Ok(())
    }

    /// Applies a batch of deltas atomically, advancing the timestamp after each.
    ///
    /// # Errors
    ///
    /// Returns an error (and stops applying further deltas in the batch) as soon as any
    /// individual delta fails.
    pub fn apply_deltas(&mut self, deltas: &OrderBookDeltas, level: BookType) -> anyhow::Result<()> {
        for delta in &deltas.deltas {
            self.apply_delta(delta, level)?;
        }
        Ok(())
    }

    /// Replaces both sides wholesale from a snapshot, using `update` (not `add`) per entry so the
    /// call is uniform across L1/L2/L3.
    ///
    /// # Errors
    ///
    /// Returns an error if `level != self.book_type`.
    pub fn apply_snapshot(
        &mut self,
        bids: &[(Price, Quantity)],
        asks: &[(Price, Quantity)],
        level: BookType,
        sequence: u64,
        ts_event: UnixNanos,
    ) -> anyhow::Result<()> {
        anyhow::ensure!(
            level == self.book_type,
            "snapshot level {level:?} does not match book type {:?}",
            self.book_type
        );
        self.clear(sequence, ts_event);
        for (i, (price, size)) in bids.iter().enumerate() {
            let order = BookOrder::new(OrderSide::Buy, *price, *size, i as OrderId);
            self.update(order, sequence, ts_event)?;
        }
        for (i, (price, size)) in asks.iter().enumerate() {
            let order = BookOrder::new(OrderSide::Sell, *price, *size, i as OrderId);
            self.update(order, sequence, ts_event)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn has_bid(&self) -> bool {
        !self.bids.is_empty()
    }

    #[must_use]
    pub fn has_ask(&self) -> bool {
        !self.asks.is_empty()
    }

    #[must_use]
    pub fn best_bid_price(&self) -> Option<Price> {
        self.bids.top().map(|l| l.price.value)
    }

    #[must_use]
    pub fn best_ask_price(&self) -> Option<Price> {
        self.asks.top().map(|l| l.price.value)
    }

    #[must_use]
    pub fn best_bid_size(&self) -> Option<f64> {
        self.bids.top().map(super::level::BookLevel::size)
    }

    #[must_use]
    pub fn best_ask_size(&self) -> Option<f64> {
        self.asks.top().map(super::level::BookLevel::size)
    }

    #[must_use]
    pub fn spread(&self) -> Option<f64> {
        match (self.best_ask_price(), self.best_bid_price()) {
            (Some(ask), Some(bid)) => Some(ask.as_f64() - bid.as_f64()),
            _ => None,
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> Option<f64> {
        match (self.best_ask_price(), self.best_bid_price()) {
            (Some(ask), Some(bid)) => Some((ask.as_f64() + bid.as_f64()) / 2.0),
            _ => None,
        }
    }

    /// Classifies the aggressor side of a trade against the last known tops.
    #[must_use]
    pub fn trade_side(&self, trade: &TradeTick) -> Option<OrderSide> {
        match (self.best_bid_price(), self.best_ask_price()) {
            (Some(bid), _) if trade.price <= bid => Some(OrderSide::Sell),
            (_, Some(ask)) if trade.price >= ask => Some(OrderSide::Buy),
            _ => None,
        }
    }

    /// Walks the opposite ladder, simulating fills for a prospective order of `side`/`qty`.
    #[must_use]
    pub fn simulate_fills(&self, order: &BookOrder) -> Vec<(Price, Quantity)> {
        let ladder = match order.side {
            OrderSide::Buy => &self.asks,
            OrderSide::Sell | OrderSide::NoOrderSide => &self.bids,
        };
        ladder
            .simulate_fills(order.size.as_f64())
            .into_iter()
            .map(|(price, qty)| (price, Quantity::new(qty, order.size.precision)))
            .collect()
    }

    /// Volume-weighted average price achievable for `qty` on `side`, walking the opposite ladder.
    #[must_use]
    pub fn get_avg_px_for_quantity(&self, qty: Quantity, side: OrderSide) -> f64 {
        let ladder = match side {
            OrderSide::Buy => &self.asks,
            OrderSide::Sell | OrderSide::NoOrderSide => &self.bids,
        };
        let fills = ladder.simulate_fills(qty.as_f64());
        let total_qty: f64 = fills.iter().map(|(_, q)| q).sum();
        if total_qty == 0.0 {
            return 0.0;
        }
        let notional: f64 = fills.iter().map(|(p, q)| p.as_f64() * q).sum();
        notional / total_qty
    }

    /// Quantity available at `price` or better on `side`.
    #[must_use]
    pub fn get_quantity_for_price(&self, price: Price, side: OrderSide) -> f64 {
        let ladder = match side {
            OrderSide::Buy => &self.asks,
            OrderSide::Sell | OrderSide::NoOrderSide => &self.bids,
        };
        ladder
            .levels
            .iter()
            .filter(|(book_price, _)| match side {
                OrderSide::Buy => book_price.value <= price,
                _ => book_price.value >= price,
            })
            .map(|(_, level)| level.size())
            .sum()
    }

    /// Updates an L1 book from a top-of-book quote.
    ///
    /// # Errors
    ///
    /// Returns an error if `self.book_type != L1_MBP`.
    pub fn update_quote_tick(&mut self, quote: &QuoteTick) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.book_type == BookType::L1_MBP,
            "`update_quote_tick` requires an L1_MBP book"
        );
        let bid = BookOrder::new(OrderSide::Buy, quote.bid_price, quote.bid_size, 0);
        let ask = BookOrder::new(OrderSide::Sell, quote.ask_price, quote.ask_size, 0);
        self.update(bid, self.sequence, quote.ts_event)?;
        self.update(ask, self.sequence, quote.ts_event)?;
        Ok(())
    }

    /// Updates an L1 book from a trade print, snapping the aggressor side to the traded price and
    /// nudging the opposite side if it would now cross.
    ///
    /// # Errors
    ///
    /// Returns an error if `self.book_type != L1_MBP`.
    pub fn update_trade_tick(&mut self, trade: &TradeTick) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.book_type == BookType::L1_MBP,
            "`update_trade_tick` requires an L1_MBP book"
        );
        let aggressor_side = match trade.aggressor_side {
            AggressorSide::Seller => OrderSide::Sell,
            _ => OrderSide::Buy,
        };
        let order = BookOrder::new(aggressor_side, trade.price, trade.size, 0);
        self.update(order, self.sequence, trade.ts_event)?;
        // Snap the opposite side to the aggressor price by assignment whenever it would cross,
        // rather than merely comparing: an L1 book only ever holds one level per side, so a stale
        // quote left on the far side after an aggressive trade must be replaced outright.
        match aggressor_side {
            OrderSide::Buy => {
                if let Some(ask) = self.best_ask_price() {
                    if ask <= trade.price {
                        let nudged = BookOrder::new(OrderSide::Sell, trade.price, trade.size, 0);
                        self.update(nudged, self.sequence, trade.ts_event)?;
                    }
                }
            }
            OrderSide::Sell => {
                if let Some(bid) = self.best_bid_price() {
                    if bid >= trade.price {
                        let nudged = BookOrder::new(OrderSide::Buy, trade.price, trade.size, 0);
                        self.update(nudged, self.sequence, trade.ts_event)?;
                    }
                }
            }
            OrderSide::NoOrderSide => {}
        }
        Ok(())
    }

    /// Absorbs a crossed-feed race: a new BUY crossing the current best ask (or a new SELL
    /// crossing the current best bid) on an L1 book clears the opposite side outright.
    fn absorb_crossed_feed(&mut self, side: OrderSide, price: Price) {
        match side {
            OrderSide::Buy => {
                if self.best_ask_price().is_some_and(|ask| price >= ask) {
                    self.asks.clear();
                }
            }
            OrderSide::Sell => {
                if self.best_bid_price().is_some_and(|bid| price <= bid) {
                    self.bids.clear();
                }
            }
            OrderSide::NoOrderSide => {}
        }
    }

    /// Asserts the book's structural invariants (I1–I3). A failure indicates a bug, not a runtime
    /// condition, so this panics rather than returning a `Result`.
    ///
    /// # Panics
    ///
    /// Panics if the book is crossed, or if an L1/L2/L3 structural limit is violated.
    pub fn check_integrity(&self) {
        if let (Some(bid), Some(ask)) = (self.best_bid_price(), self.best_ask_price()) {
            assert!(bid < ask, "book is crossed: best_bid {bid} >= best_ask {ask}");
        }
        match self.book_type {
            BookType::L1_MBP => {
                assert!(self.bids.len() <= 1, "L1 book has more than one bid level");
                assert!(self.asks.len() <= 1, "L1 book has more than one ask level");
            }
            BookType::L2_MBP => {
                for level in self.bids.levels.values().chain(self.asks.levels.values()) {
                    assert_eq!(level.len(), 1, "L2 level holds more than one order");
                }
            }
            BookType::L3_MBO => {}
        }
    }

    #[must_use]
    pub fn pprint(&self, num_levels: usize) -> String {
        let mut out = String::new();
        out.push_str("asks:\n");
        for level in self.asks.depth(num_levels).into_iter().rev() {
            out.push_str(&format!("  {} @ {}\n", level.size(), level.price.value));
        }
        out.push_str("bids:\n");
        for level in self.bids.depth(num_levels) {
            out.push_str(&format!("  {} @ {}\n", level.size(), level.price.value));
        }
        out
    }
}

fn l1_order_id(side: OrderSide) -> OrderId {
    match side {
        OrderSide::Buy => 1,
        OrderSide::Sell | OrderSide::NoOrderSide => 2,
    }
}

fn l2_order_id(price: Price, side: OrderSide) -> OrderId {
    // One order per level: derive a stable id from the formatted price so re-inserting at the
    // same price always resolves to the same resting order.
    let tag: u64 = match side.as_specified() {
        OrderSideSpecified::Buy => 1,
        OrderSideSpecified::Sell => 2,
    };
    (price.raw as u64).wrapping_mul(4).wrapping_add(tag)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::identifiers::stubs::instrument_id_btc_usdt;

    #[fixture]
    fn book_l2() -> OrderBook {
        OrderBook::new(instrument_id_btc_usdt(), BookType::L2_MBP)
    }

    #[fixture]
    fn book_l1() -> OrderBook {
        OrderBook::new(instrument_id_btc_usdt(), BookType::L1_MBP)
    }

    fn order(side: OrderSide, price: f64, size: f64, id: OrderId) -> BookOrder {
        BookOrder::new(side, Price::new(price, 2), Quantity::new(size, 0), id)
    }

    #[rstest]
    fn test_empty_book_tops_are_none(book_l2: OrderBook) {
        assert_eq!(book_l2.best_bid_price(), None);
        assert_eq!(book_l2.spread(), None);
    }

    #[rstest]
    fn test_l2_update_replaces_whole_level(mut book_l2: OrderBook) {
        book_l2.add(order(OrderSide::Buy, 100.0, 5.0, 1), 1, 1.into()).unwrap();
        book_l2.update(order(OrderSide::Buy, 100.0, 7.0, 1), 2, 2.into()).unwrap();
        assert_eq!(book_l2.bids.len(), 1);
        assert_eq!(book_l2.bids.top().unwrap().size(), 7.0);
    }

    #[rstest]
    fn test_l1_crossed_feed_absorbed(mut book_l1: OrderBook) {
        book_l1.update(order(OrderSide::Buy, 101.0, 1.0, 0), 1, 1.into()).unwrap();
        book_l1.update(order(OrderSide::Sell, 100.0, 1.0, 0), 2, 2.into()).unwrap();
        assert!(!book_l1.has_bid());
        assert_eq!(book_l1.best_ask_price(), Some(Price::new(100.0, 2)));
    }

    #[rstest]
    fn test_aggressive_sweep_fills_across_levels(mut book_l2: OrderBook) {
        book_l2.add(order(OrderSide::Sell, 100.0, 2.0, 1), 1, 1.into()).unwrap();
        book_l2.add(order(OrderSide::Sell, 101.0, 3.0, 2), 2, 2.into()).unwrap();
        let buy = order(OrderSide::Buy, 101.0, 4.0, 99);
        let fills = book_l2.simulate_fills(&buy);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].1.as_f64(), 2.0);
        assert_eq!(fills[1].1.as_f64(), 2.0);
    }

    #[rstest]
    fn test_check_integrity_panics_on_crossed_book(mut book_l2: OrderBook) {
        book_l2.add(order(OrderSide::Buy, 102.0, 1.0, 1), 1, 1.into()).unwrap();
        book_l2.add(order(OrderSide::Sell, 100.0, 1.0, 2), 2, 2.into()).unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| book_l2.check_integrity()));
        assert!(result.is_err());
    }

    #[rstest]
    fn test_idempotent_clear(mut book_l2: OrderBook) {
        book_l2.add(order(OrderSide::Buy, 100.0, 1.0, 1), 1, 1.into()).unwrap();
        book_l2.clear(2, 2.into());
        book_l2.clear(3, 3.into());
        assert!(!book_l2.has_bid());
    }
}
