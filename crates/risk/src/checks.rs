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

//! Pre-trade risk checking.
//!
//! [`PreTradeRiskChecker`] is the default [`RiskHandler`](crate::engine::RiskHandler): it validates
//! submitted orders against the instruments it knows about and a configured notional ceiling, then
//! forwards approved commands to a downstream sink (normally an execution engine's `execute`).

use ahash::AHashMap;
use axiom_common::messages::{ExecutionEvent, execution::TradingCommand};
use axiom_model::{identifiers::InstrumentId, instruments::InstrumentAny, orders::Order};
use tokio::sync::mpsc::UnboundedSender;

use crate::engine::{RiskEngineConfig, RiskHandler};

/// Forwards a command that passed risk checks.
pub trait ApprovedSink: std::fmt::Debug + Send + 'static {
    fn send(&self, command: TradingCommand);
}

impl ApprovedSink for UnboundedSender<TradingCommand> {
    fn send(&self, command: TradingCommand) {
        if self.send(command).is_err() {
            log::error!("risk engine approved-command sink closed; command dropped");
        }
    }
}

/// Validates [`SubmitOrder`](axiom_common::messages::execution::SubmitOrder) commands against
/// known instruments before forwarding them downstream.
///
/// Unknown-instrument orders and orders breaching the configured notional ceiling are denied: the
/// reason is logged and the command is dropped. All other command kinds pass straight through,
/// since they carry no new exposure to evaluate. [`Self::handle_event`] is a no-op; the checker
/// only needs the read side of the cache to evaluate commands and currently tracks nothing
/// cross-event.
#[derive(Debug)]
pub struct PreTradeRiskChecker<S: ApprovedSink> {
    config: RiskEngineConfig,
    instruments: AHashMap<InstrumentId, InstrumentAny>,
    sink: S,
}

impl<S: ApprovedSink> PreTradeRiskChecker<S> {
    #[must_use]
    pub fn new(config: RiskEngineConfig, sink: S) -> Self {
        Self {
            config,
            instruments: AHashMap::new(),
            sink,
        }
    }

    pub fn add_instrument(&mut self, instrument: InstrumentAny) {
        self.instruments.insert(instrument.id, instrument);
    }

    /// Returns `Err(reason)` if the command should be denied.
    fn check(&self, command: &TradingCommand) -> Result<(), String> {
        if self.config.bypass {
            return Ok(());
        }
        let TradingCommand::SubmitOrder(submit) = command else {
            return Ok(());
        };
        let Some(instrument) = self.instruments.get(&submit.instrument_id) else {
            return Err(format!("unknown instrument {}", submit.instrument_id));
        };
        let quantity = submit.order.quantity();
        if let Some(min_quantity) = instrument.min_quantity
            && quantity.as_decimal() < min_quantity.as_decimal()
        {
            return Err(format!("quantity {quantity} below instrument minimum {min_quantity}"));
        }
        if let Some(max_quantity) = instrument.max_quantity
            && quantity.as_decimal() > max_quantity.as_decimal()
        {
            return Err(format!("quantity {quantity} above instrument maximum {max_quantity}"));
        }
        if let (Some(max_notional), Some(price)) =
            (self.config.max_notional_per_order, submit.order.price())
        {
            let notional = quantity.as_decimal() * price.as_decimal();
            if notional > max_notional {
                return Err(format!("order notional {notional} exceeds ceiling {max_notional}"));
            }
        }
        Ok(())
    }
}

impl<S: ApprovedSink> RiskHandler for PreTradeRiskChecker<S> {
    fn handle_command(&mut self, command: TradingCommand) {
        match self.check(&command) {
            Ok(()) => {
                if self.config.debug {
                    log::debug!("risk engine approved {command}");
                }
                self.sink.send(command);
            }
            Err(reason) => {
                log::warn!("risk engine denied {command}: {reason}");
            }
        }
    }

    fn handle_event(&mut self, _event: ExecutionEvent) {}
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axiom_core::UUID4;
    use axiom_model::{
        enums::{OrderSide, OrderType},
        events::OrderInitialized,
        identifiers::{ClientId, ClientOrderId, StrategyId, TraderId, VenueOrderId},
        instruments::stubs::currency_pair_btcusdt,
        orders::{MarketOrder, OrderAny},
    };
    use rstest::rstest;

    use super::*;
    use crate::engine::RiskEngineConfig;

    #[derive(Clone, Debug, Default)]
    struct RecordingSink {
        approved: Arc<Mutex<Vec<TradingCommand>>>,
    }

    impl ApprovedSink for RecordingSink {
        fn send(&self, command: TradingCommand) {
            self.approved.lock().unwrap().push(command);
        }
    }

    fn market_order(instrument: &InstrumentAny, quantity: axiom_model::types::Quantity) -> OrderAny {
        OrderAny::Market(MarketOrder::new(OrderInitialized {
            instrument_id: instrument.id,
            order_side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity,
            ..Default::default()
        }))
    }

    fn submit_order(instrument: &InstrumentAny, order: OrderAny) -> TradingCommand {
        TradingCommand::SubmitOrder(
            axiom_common::messages::execution::SubmitOrder::new(
                TraderId::from("TRADER-001"),
                ClientId::from("SIM"),
                StrategyId::from("S-001"),
                instrument.id,
                ClientOrderId::from("O-1"),
                VenueOrderId::from("V-1"),
                order,
                None,
                None,
                UUID4::new(),
                Default::default(),
            )
            .unwrap(),
        )
    }

    #[rstest]
    fn test_bypass_approves_everything() {
        let instrument = currency_pair_btcusdt();
        let sink = RecordingSink::default();
        let mut checker = PreTradeRiskChecker::new(
            RiskEngineConfig { bypass: true, ..Default::default() },
            sink.clone(),
        );
        let order = market_order(&instrument, instrument.min_quantity.unwrap());
        checker.handle_command(submit_order(&instrument, order));
        assert_eq!(sink.approved.lock().unwrap().len(), 1);
    }

    #[rstest]
    fn test_quantity_below_minimum_is_denied() {
        let instrument = currency_pair_btcusdt();
        let sink = RecordingSink::default();
        let mut checker = PreTradeRiskChecker::new(RiskEngineConfig::default(), sink.clone());
        checker.add_instrument(instrument);
        let order = market_order(&instrument, axiom_model::types::Quantity::new(0.0, 6));
        checker.handle_command(submit_order(&instrument, order));
        assert!(sink.approved.lock().unwrap().is_empty());
    }

    #[rstest]
    fn test_unknown_instrument_is_denied() {
        let instrument = currency_pair_btcusdt();
        let sink = RecordingSink::default();
        let mut checker = PreTradeRiskChecker::new(RiskEngineConfig::default(), sink.clone());
        let order = market_order(&instrument, instrument.min_quantity.unwrap());
        checker.handle_command(submit_order(&instrument, order));
        assert!(sink.approved.lock().unwrap().is_empty());
    }

    #[rstest]
    fn test_known_instrument_within_bounds_is_approved() {
        let instrument = currency_pair_btcusdt();
        let sink = RecordingSink::default();
        let mut checker = PreTradeRiskChecker::new(RiskEngineConfig::default(), sink.clone());
        checker.add_instrument(instrument);
        let order = market_order(&instrument, instrument.min_quantity.unwrap());
        checker.handle_command(submit_order(&instrument, order));
        assert_eq!(sink.approved.lock().unwrap().len(), 1);
    }
}
