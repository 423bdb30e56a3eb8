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

use axiom_common::{enums::Environment, logging::logger::LoggerConfig};
use axiom_core::{UUID4, UnixNanos};
use axiom_execution::engine::config::ExecutionEngineConfig;
use axiom_model::{
    data::BarSpecification,
    enums::{AccountType, BookType, OmsType},
    identifiers::{ClientId, InstrumentId, TraderId},
    types::Currency,
};
use axiom_persistence::config::StreamingConfig;
use axiom_risk::engine::config::RiskEngineConfig;
use ustr::Ustr;

/// Configuration for [`BacktestEngine`](crate::engine::BacktestEngine) instances.
#[derive(Debug, Clone)]
pub struct BacktestEngineConfig {
    /// The trader ID for the backtest run.
    pub trader_id: TraderId,
    /// If account/order/position state should be reloaded from the event-sourced cache on start.
    pub load_state: bool,
    /// If account/order/position state should be flushed to the event-sourced cache on stop.
    pub save_state: bool,
    /// The logging configuration.
    pub logging: LoggerConfig,
    /// The unique instance identifier for this run.
    pub instance_id: Option<UUID4>,
    /// The risk engine configuration.
    pub risk_engine: Option<RiskEngineConfig>,
    /// The execution engine configuration.
    pub exec_engine: Option<ExecutionEngineConfig>,
    /// The configuration for streaming results to the event-sourced store.
    pub streaming: Option<StreamingConfig>,
    /// If logging should be bypassed (useful for high-iteration parameter sweeps).
    pub bypass_logging: bool,
}

impl BacktestEngineConfig {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trader_id: TraderId,
        load_state: Option<bool>,
        save_state: Option<bool>,
        bypass_logging: Option<bool>,
        logging: Option<LoggerConfig>,
        instance_id: Option<UUID4>,
        risk_engine: Option<RiskEngineConfig>,
        exec_engine: Option<ExecutionEngineConfig>,
        streaming: Option<StreamingConfig>,
    ) -> Self {
        Self {
            trader_id,
            load_state: load_state.unwrap_or(false),
            save_state: save_state.unwrap_or(false),
            logging: logging.unwrap_or_default(),
            instance_id,
            risk_engine,
            exec_engine,
            streaming,
            bypass_logging: bypass_logging.unwrap_or(false),
        }
    }

    /// Returns the kernel environment context, always [`Environment::Backtest`].
    #[must_use]
    pub const fn environment(&self) -> Environment {
        Environment::Backtest
    }
}

impl Default for BacktestEngineConfig {
    fn default() -> Self {
        Self {
            trader_id: TraderId::default(),
            load_state: false,
            save_state: false,
            logging: LoggerConfig::default(),
            instance_id: None,
            risk_engine: None,
            exec_engine: None,
            streaming: None,
            bypass_logging: false,
        }
    }
}

/// Represents a venue configuration for one specific backtest engine.
#[derive(Debug, Clone)]
pub struct BacktestVenueConfig {
    /// The name of the venue.
    pub name: Ustr,
    /// The order management system type for the exchange. If `Hedging`, new position IDs are generated.
    pub oms_type: OmsType,
    /// The account type for the exchange.
    pub account_type: AccountType,
    /// The default order book type.
    pub book_type: BookType,
    /// The starting account balances (specify one for a single asset account).
    pub starting_balances: Vec<String>,
    /// If the account for this exchange is frozen (balances will not change).
    pub frozen_account: bool,
    /// If stop orders are rejected on submission when the trigger price is already in the market.
    pub reject_stop_orders: bool,
    /// If contingent orders (OCO/bracket) are managed by the venue.
    pub support_contingent_orders: bool,
    /// If the `reduce_only` execution instruction on orders will be honored.
    pub use_reduce_only: bool,
    /// The account base currency. Use `None` for multi-currency accounts.
    pub base_currency: Option<Currency>,
    /// The account default leverage (for margin accounts).
    pub default_leverage: Option<f64>,
    /// The instrument specific leverage configuration (for margin accounts).
    pub leverages: Option<HashMap<Currency, f64>>,
}

impl BacktestVenueConfig {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        name: Ustr,
        oms_type: OmsType,
        account_type: AccountType,
        book_type: BookType,
        frozen_account: Option<bool>,
        reject_stop_orders: Option<bool>,
        support_contingent_orders: Option<bool>,
        use_reduce_only: Option<bool>,
        starting_balances: Vec<String>,
        base_currency: Option<Currency>,
        default_leverage: Option<f64>,
        leverages: Option<HashMap<Currency, f64>>,
    ) -> Self {
        Self {
            name,
            oms_type,
            account_type,
            book_type,
            frozen_account: frozen_account.unwrap_or(false),
            reject_stop_orders: reject_stop_orders.unwrap_or(true),
            support_contingent_orders: support_contingent_orders.unwrap_or(true),
            use_reduce_only: use_reduce_only.unwrap_or(true),
            starting_balances,
            base_currency,
            default_leverage,
            leverages,
        }
    }
}

/// Represents the data configuration for one specific backtest run.
#[derive(Debug, Clone)]
pub struct BacktestDataConfig {
    /// The path to the data catalog.
    pub catalog_path: String,
    /// The instrument ID for the data configuration.
    pub instrument_id: Option<InstrumentId>,
    /// The start time for the data configuration.
    pub start_time: Option<UnixNanos>,
    /// The end time for the data configuration.
    pub end_time: Option<UnixNanos>,
    /// The client ID for the data configuration.
    pub client_id: Option<ClientId>,
    /// The bar specification for the data catalog query.
    pub bar_spec: Option<BarSpecification>,
}

impl BacktestDataConfig {
    #[must_use]
    pub const fn new(
        catalog_path: String,
        instrument_id: Option<InstrumentId>,
        start_time: Option<UnixNanos>,
        end_time: Option<UnixNanos>,
        client_id: Option<ClientId>,
        bar_spec: Option<BarSpecification>,
    ) -> Self {
        Self {
            catalog_path,
            instrument_id,
            start_time,
            end_time,
            client_id,
            bar_spec,
        }
    }
}

/// Represents the configuration for one specific backtest run: a backtest engine plus the
/// external inputs of venues and data.
#[derive(Debug, Clone)]
pub struct BacktestRunConfig {
    /// The venue configurations for the backtest run.
    pub venues: Vec<BacktestVenueConfig>,
    /// The data configurations for the backtest run.
    pub data: Vec<BacktestDataConfig>,
    /// The backtest engine configuration.
    pub engine: BacktestEngineConfig,
    /// The number of data points to process in each chunk during streaming mode. If `None`, the
    /// backtest runs without streaming, loading all data at once.
    pub chunk_size: Option<usize>,
    /// The start timestamp for the backtest run. If `None`, runs from the start of the data.
    pub start: Option<UnixNanos>,
    /// The end timestamp for the backtest run. If `None`, runs to the end of the data.
    pub end: Option<UnixNanos>,
}

impl BacktestRunConfig {
    #[must_use]
    pub fn new(
        venues: Vec<BacktestVenueConfig>,
        data: Vec<BacktestDataConfig>,
        engine: BacktestEngineConfig,
        chunk_size: Option<usize>,
        start: Option<UnixNanos>,
        end: Option<UnixNanos>,
    ) -> Self {
        Self {
            venues,
            data,
            engine,
            chunk_size,
            start,
            end,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_engine_config() {
        let config = BacktestEngineConfig::default();
        assert_eq!(config.environment(), Environment::Backtest);
        assert!(!config.load_state);
        assert!(!config.bypass_logging);
    }
}
