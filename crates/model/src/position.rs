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

//! An event-sourced position aggregate, reconstructed from the opening [`OrderFilled`] and
//! thereafter mutated only by folding subsequent fills.

use std::collections::HashMap;

use axiom_core::UnixNanos;

use crate::{
    enums::{OrderSide, PositionSide},
    events::OrderFilled,
    identifiers::{AccountId, ClientOrderId, InstrumentId, PositionId, StrategyId, TraderId},
    instruments::Instrument,
    types::{Currency, Money, Price, Quantity},
};

/// A position, opened by a first fill and mutated only via [`Position::apply`].
///
/// Positions live from the opening fill until flat (`quantity == 0`); once flat they are retained
/// for audit rather than dropped, matching the persistence contract in `CacheDatabaseAdapter`.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub id: PositionId,
    pub trader_id: TraderId,
    pub strategy_id: StrategyId,
    pub instrument_id: InstrumentId,
    pub account_id: AccountId,
    pub opening_order_id: ClientOrderId,
    pub closing_order_id: Option<ClientOrderId>,
    pub entry: OrderSide,
    pub side: PositionSide,
    pub signed_qty: f64,
    pub quantity: Quantity,
    pub peak_qty: Quantity,
    pub quote_currency: Currency,
    pub base_currency: Option<Currency>,
    pub settlement_currency: Currency,
    pub is_inverse: bool,
    pub multiplier: Quantity,
    pub avg_px_open: f64,
    pub avg_px_close: Option<f64>,
    pub realized_return: f64,
    pub realized_pnl: Option<Money>,
    pub commissions: HashMap<Currency, Money>,
    pub ts_opened: UnixNanos,
    pub ts_last: UnixNanos,
    pub ts_closed: Option<UnixNanos>,
    pub events: Vec<OrderFilled>,
}

impl Position {
    /// Creates a new [`Position`] from the opening fill.
    ///
    /// # Panics
    ///
    /// Panics if `fill.order_side` is [`OrderSide::NoOrderSide`].
    #[must_use]
    pub fn new(instrument: &Instrument, fill: OrderFilled) -> Self {
        let side = match fill.order_side {
            OrderSide::Buy => PositionSide::Long,
            OrderSide::Sell => PositionSide::Short,
            OrderSide::NoOrderSide => panic!("cannot open a position from a fill with no side"),
        };
        let signed_qty = signed_quantity(fill.order_side, fill.last_qty);
        let mut commissions = HashMap::new();
        if let Some(commission) = fill.commission {
            commissions.insert(commission.currency, commission);
        }
        Self {
            id: fill
                .position_id
                .unwrap_or_else(|| PositionId::new(format!("P-{}", fill.trade_id).as_str())),
            trader_id: fill.trader_id,
            strategy_id: fill.strategy_id,
            instrument_id: fill.instrument_id,
            account_id: fill.account_id,
            opening_order_id: fill.client_order_id,
            closing_order_id: None,
            entry: fill.order_side,
            side,
            signed_qty,
            quantity: fill.last_qty,
            peak_qty: fill.last_qty,
            quote_currency: instrument.quote_currency,
            base_currency: None,
            settlement_currency: instrument.settlement_currency,
            is_inverse: instrument.is_inverse,
            multiplier: instrument.multiplier,
            avg_px_open: fill.last_px.as_f64(),
            avg_px_close: None,
            realized_return: 0.0,
            realized_pnl: None,
            commissions,
            ts_opened: fill.ts_event,
            ts_last: fill.ts_event,
            ts_closed: None,
            events: vec![fill],
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.side != PositionSide::Flat
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.side == PositionSide::Flat
    }

    #[must_use]
    pub fn is_long(&self) -> bool {
        self.side == PositionSide::Long
    }

    #[must_use]
    pub fn is_short(&self) -> bool {
        self.side == PositionSide::Short
    }

    /// Folds a subsequent fill into this position: same-side fills extend it, opposite-side
    /// fills reduce it, and a fill larger than the remaining quantity flips it to the other side.
    pub fn apply(&mut self, fill: OrderFilled) {
        let fill_signed = signed_quantity(fill.order_side, fill.last_qty);
        let same_direction = self.signed_qty.signum() == fill_signed.signum() || self.signed_qty == 0.0;

        if same_direction {
            let total = self.quantity.as_f64() + fill.last_qty.as_f64();
            self.avg_px_open =
                (self.avg_px_open * self.quantity.as_f64() + fill.last_px.as_f64() * fill.last_qty.as_f64()) / total;
            self.quantity = Quantity::new(total, self.quantity.precision);
        } else {
            let closing_qty = fill.last_qty.as_f64().min(self.quantity.as_f64());
            let pnl = self.calculate_pnl(fill.last_px, closing_qty);
            self.realized_pnl = Some(
                self.realized_pnl
                    .map_or(pnl, |existing| existing + pnl),
            );
            self.realized_return += pnl.as_f64() / (self.avg_px_open * closing_qty).max(f64::EPSILON);
            self.avg_px_close = Some(fill.last_px.as_f64());
            self.closing_order_id = Some(fill.client_order_id);

            let remaining = fill.last_qty.as_f64() - closing_qty;
            if remaining > 0.0 {
                // Flipped through flat: the excess opens a new position in the fill's direction.
                self.quantity = Quantity::new(remaining, self.quantity.precision);
                self.avg_px_open = fill.last_px.as_f64();
                self.entry = fill.order_side;
            } else {
                self.quantity = Quantity::new(self.quantity.as_f64() - closing_qty, self.quantity.precision);
            }
        }

        self.signed_qty += fill_signed;
        self.side = position_side_for_signed_qty(self.signed_qty);
        if self.quantity.as_f64() > self.peak_qty.as_f64() {
            self.peak_qty = self.quantity;
        }
        if let Some(commission) = fill.commission {
            self.commissions
                .entry(commission.currency)
                .and_modify(|total| *total += commission)
                .or_insert(commission);
        }
        self.ts_last = fill.ts_event;
        if self.side == PositionSide::Flat {
            self.ts_closed = Some(fill.ts_event);
        } else {
            self.ts_closed = None;
        }
        self.events.push(fill);
    }

    /// Realized or mark-to-market PnL for closing `qty` at `price`, inclusive of direction.
    #[must_use]
    pub fn calculate_pnl(&self, price: Price, qty: f64) -> Money {
        let direction = match self.side {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
            _ => 0.0,
        };
        let diff = price.as_f64() - self.avg_px_open;
        let pnl = direction * diff * qty * self.multiplier.as_f64();
        Money::new(pnl, self.settlement_currency)
    }

    /// Unrealized PnL given the instrument's last traded price.
    #[must_use]
    pub fn unrealized_pnl(&self, last: Price) -> Money {
        if self.is_closed() {
            return Money::zero(self.settlement_currency);
        }
        self.calculate_pnl(last, self.quantity.as_f64())
    }
}

fn signed_quantity(side: OrderSide, qty: Quantity) -> f64 {
    match side {
        OrderSide::Buy => qty.as_f64(),
        OrderSide::Sell => -qty.as_f64(),
        OrderSide::NoOrderSide => 0.0,
    }
}

fn position_side_for_signed_qty(signed_qty: f64) -> PositionSide {
    if signed_qty > 0.0 {
        PositionSide::Long
    } else if signed_qty < 0.0 {
        PositionSide::Short
    } else {
        PositionSide::Flat
    }
}
