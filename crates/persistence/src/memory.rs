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

//! An in-memory reference implementation of [`CacheDatabaseAdapter`].
//!
//! Stands in for an external key/value event-log store (Redis or otherwise) in backtests and
//! tests. Values are kept as typed entries rather than folded event logs, which is a deliberate
//! simplification: the real store is append-only and reconstructs state by replaying events, this
//! adapter stores the latest state directly since there is no process boundary to recover across.

use std::sync::Mutex;

use ahash::AHashMap;
use async_trait::async_trait;
use bytes::Bytes;
use axiom_common::{
    cache::database::{CacheDatabaseAdapter, CacheMap},
    custom::CustomData,
    signal::Signal,
};
use axiom_core::UnixNanos;
use axiom_model::{
    accounts::AccountAny,
    data::{Bar, DataType, QuoteTick, TradeTick},
    events::{OrderEventAny, OrderSnapshot, position::snapshot::PositionSnapshot},
    identifiers::{
        AccountId, ClientId, ClientOrderId, ComponentId, InstrumentId, PositionId, StrategyId,
        VenueOrderId,
    },
    instruments::InstrumentAny,
    orderbook::OrderBook,
    orders::OrderAny,
    position::Position,
    types::Currency,
};
use ustr::Ustr;

/// An in-memory stand-in for the event-sourced cache database.
///
/// All mutating operations are infallible by construction (no I/O, no serialization), so the
/// `anyhow::Result` return types on [`CacheDatabaseAdapter`] are always `Ok` here.
#[derive(Debug, Default)]
pub struct InMemoryCacheDatabase {
    general: Mutex<AHashMap<String, Bytes>>,
    currencies: Mutex<AHashMap<Ustr, Currency>>,
    instruments: Mutex<AHashMap<InstrumentId, InstrumentAny>>,
    accounts: Mutex<AHashMap<AccountId, AccountAny>>,
    orders: Mutex<AHashMap<ClientOrderId, OrderAny>>,
    positions: Mutex<AHashMap<PositionId, Position>>,
    order_snapshots: Mutex<AHashMap<ClientOrderId, OrderSnapshot>>,
    position_snapshots: Mutex<AHashMap<PositionId, PositionSnapshot>>,
    order_books: Mutex<AHashMap<InstrumentId, OrderBook>>,
    quotes: Mutex<AHashMap<InstrumentId, Vec<QuoteTick>>>,
    trades: Mutex<AHashMap<InstrumentId, Vec<TradeTick>>>,
    bars: Mutex<AHashMap<InstrumentId, Vec<Bar>>>,
    signals: Mutex<AHashMap<String, Vec<Signal>>>,
    custom_data: Mutex<AHashMap<DataType, Vec<CustomData>>>,
    actors: Mutex<AHashMap<ComponentId, AHashMap<String, Bytes>>>,
    strategies: Mutex<AHashMap<StrategyId, AHashMap<String, Bytes>>>,
    index_order_position: Mutex<AHashMap<ClientOrderId, PositionId>>,
    index_order_client: Mutex<AHashMap<ClientOrderId, ClientId>>,
}

impl InMemoryCacheDatabase {
    /// Creates a new empty [`InMemoryCacheDatabase`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheDatabaseAdapter for InMemoryCacheDatabase {
    fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        *self.general.lock().unwrap() = AHashMap::new();
        *self.currencies.lock().unwrap() = AHashMap::new();
        *self.instruments.lock().unwrap() = AHashMap::new();
        *self.accounts.lock().unwrap() = AHashMap::new();
        *self.orders.lock().unwrap() = AHashMap::new();
        *self.positions.lock().unwrap() = AHashMap::new();
        Ok(())
    }

    async fn load_all(&self) -> anyhow::Result<CacheMap> {
        Ok(CacheMap {
            currencies: self.currencies.lock().unwrap().clone(),
            instruments: self.instruments.lock().unwrap().clone(),
            accounts: self.accounts.lock().unwrap().clone(),
            orders: self.orders.lock().unwrap().clone(),
            positions: self.positions.lock().unwrap().clone(),
        })
    }

    fn load(&self) -> anyhow::Result<AHashMap<String, Bytes>> {
        Ok(self.general.lock().unwrap().clone())
    }

    async fn load_currencies(&self) -> anyhow::Result<AHashMap<Ustr, Currency>> {
        Ok(self.currencies.lock().unwrap().clone())
    }

    async fn load_instruments(&self) -> anyhow::Result<AHashMap<InstrumentId, InstrumentAny>> {
        Ok(self.instruments.lock().unwrap().clone())
    }

    async fn load_accounts(&self) -> anyhow::Result<AHashMap<AccountId, AccountAny>> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn load_orders(&self) -> anyhow::Result<AHashMap<ClientOrderId, OrderAny>> {
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn load_positions(&self) -> anyhow::Result<AHashMap<PositionId, Position>> {
        Ok(self.positions.lock().unwrap().clone())
    }

    fn load_index_order_position(&self) -> anyhow::Result<AHashMap<ClientOrderId, Position>> {
        let index = self.index_order_position.lock().unwrap();
        let positions = self.positions.lock().unwrap();
        Ok(index
            .iter()
            .filter_map(|(client_order_id, position_id)| {
                positions
                    .get(position_id)
                    .map(|position| (*client_order_id, position.clone()))
            })
            .collect())
    }

    fn load_index_order_client(&self) -> anyhow::Result<AHashMap<ClientOrderId, ClientId>> {
        Ok(self.index_order_client.lock().unwrap().clone())
    }

    async fn load_currency(&self, code: &Ustr) -> anyhow::Result<Option<Currency>> {
        Ok(self.currencies.lock().unwrap().get(code).copied())
    }

    async fn load_instrument(
        &self,
        instrument_id: &InstrumentId,
    ) -> anyhow::Result<Option<InstrumentAny>> {
        Ok(self.instruments.lock().unwrap().get(instrument_id).cloned())
    }

    async fn load_account(&self, account_id: &AccountId) -> anyhow::Result<Option<AccountAny>> {
        Ok(self.accounts.lock().unwrap().get(account_id).cloned())
    }

    async fn load_order(
        &self,
        client_order_id: &ClientOrderId,
    ) -> anyhow::Result<Option<OrderAny>> {
        Ok(self.orders.lock().unwrap().get(client_order_id).cloned())
    }

    async fn load_position(&self, position_id: &PositionId) -> anyhow::Result<Option<Position>> {
        Ok(self.positions.lock().unwrap().get(position_id).cloned())
    }

    fn load_actor(&self, component_id: &ComponentId) -> anyhow::Result<AHashMap<String, Bytes>> {
        Ok(self
            .actors
            .lock()
            .unwrap()
            .get(component_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_strategy(&self, strategy_id: &StrategyId) -> anyhow::Result<AHashMap<String, Bytes>> {
        Ok(self
            .strategies
            .lock()
            .unwrap()
            .get(strategy_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_signals(&self, name: &str) -> anyhow::Result<Vec<Signal>> {
        Ok(self
            .signals
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn load_custom_data(&self, data_type: &DataType) -> anyhow::Result<Vec<CustomData>> {
        Ok(self
            .custom_data
            .lock()
            .unwrap()
            .get(data_type)
            .cloned()
            .unwrap_or_default())
    }

    fn load_order_snapshot(
        &self,
        client_order_id: &ClientOrderId,
    ) -> anyhow::Result<Option<OrderSnapshot>> {
        Ok(self
            .order_snapshots
            .lock()
            .unwrap()
            .get(client_order_id)
            .cloned())
    }

    fn load_position_snapshot(
        &self,
        position_id: &PositionId,
    ) -> anyhow::Result<Option<PositionSnapshot>> {
        Ok(self
            .position_snapshots
            .lock()
            .unwrap()
            .get(position_id)
            .cloned())
    }

    fn load_quotes(&self, instrument_id: &InstrumentId) -> anyhow::Result<Vec<QuoteTick>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .get(instrument_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_trades(&self, instrument_id: &InstrumentId) -> anyhow::Result<Vec<TradeTick>> {
        Ok(self
            .trades
            .lock()
            .unwrap()
            .get(instrument_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_bars(&self, instrument_id: &InstrumentId) -> anyhow::Result<Vec<Bar>> {
        Ok(self
            .bars
            .lock()
            .unwrap()
            .get(instrument_id)
            .cloned()
            .unwrap_or_default())
    }

    fn add(&self, key: String, value: Bytes) -> anyhow::Result<()> {
        self.general.lock().unwrap().insert(key, value);
        Ok(())
    }

    fn add_currency(&self, currency: &Currency) -> anyhow::Result<()> {
        self.currencies
            .lock()
            .unwrap()
            .insert(currency.code, *currency);
        Ok(())
    }

    fn add_instrument(&self, instrument: &InstrumentAny) -> anyhow::Result<()> {
        self.instruments
            .lock()
            .unwrap()
            .insert(instrument.id, *instrument);
        Ok(())
    }

    fn add_account(&self, account: &AccountAny) -> anyhow::Result<()> {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.id(), account.clone());
        Ok(())
    }

    fn add_order(&self, order: &OrderAny, client_id: Option<ClientId>) -> anyhow::Result<()> {
        self.orders
            .lock()
            .unwrap()
            .insert(order.client_order_id(), order.clone());
        if let Some(client_id) = client_id {
            self.index_order_client
                .lock()
                .unwrap()
                .insert(order.client_order_id(), client_id);
        }
        Ok(())
    }

    fn add_order_snapshot(&self, snapshot: &OrderSnapshot) -> anyhow::Result<()> {
        self.order_snapshots
            .lock()
            .unwrap()
            .insert(snapshot.client_order_id, snapshot.clone());
        Ok(())
    }

    fn add_position(&self, position: &Position) -> anyhow::Result<()> {
        self.positions
            .lock()
            .unwrap()
            .insert(position.id, position.clone());
        Ok(())
    }

    fn add_position_snapshot(&self, snapshot: &PositionSnapshot) -> anyhow::Result<()> {
        self.position_snapshots
            .lock()
            .unwrap()
            .insert(snapshot.position_id, snapshot.clone());
        Ok(())
    }

    fn add_order_book(&self, order_book: &OrderBook) -> anyhow::Result<()> {
        self.order_books
            .lock()
            .unwrap()
            .insert(order_book.instrument_id, order_book.clone());
        Ok(())
    }

    fn add_signal(&self, signal: &Signal) -> anyhow::Result<()> {
        self.signals
            .lock()
            .unwrap()
            .entry(signal.name.clone())
            .or_default()
            .push(signal.clone());
        Ok(())
    }

    fn add_custom_data(&self, data: &CustomData) -> anyhow::Result<()> {
        self.custom_data
            .lock()
            .unwrap()
            .entry(data.data_type.clone())
            .or_default()
            .push(data.clone());
        Ok(())
    }

    fn add_quote(&self, quote: &QuoteTick) -> anyhow::Result<()> {
        self.quotes
            .lock()
            .unwrap()
            .entry(quote.instrument_id)
            .or_default()
            .push(*quote);
        Ok(())
    }

    fn add_trade(&self, trade: &TradeTick) -> anyhow::Result<()> {
        self.trades
            .lock()
            .unwrap()
            .entry(trade.instrument_id)
            .or_default()
            .push(*trade);
        Ok(())
    }

    fn add_bar(&self, bar: &Bar) -> anyhow::Result<()> {
        self.bars
            .lock()
            .unwrap()
            .entry(bar.bar_type.instrument_id())
            .or_default()
            .push(*bar);
        Ok(())
    }

    fn delete_actor(&self, component_id: &ComponentId) -> anyhow::Result<()> {
        self.actors.lock().unwrap().remove(component_id);
        Ok(())
    }

    fn delete_strategy(&self, component_id: &StrategyId) -> anyhow::Result<()> {
        self.strategies.lock().unwrap().remove(component_id);
        Ok(())
    }

    fn delete_order(&self, client_order_id: &ClientOrderId) -> anyhow::Result<()> {
        self.orders.lock().unwrap().remove(client_order_id);
        self.index_order_client
            .lock()
            .unwrap()
            .remove(client_order_id);
        self.index_order_position
            .lock()
            .unwrap()
            .remove(client_order_id);
        Ok(())
    }

    fn delete_position(&self, position_id: &PositionId) -> anyhow::Result<()> {
        self.positions.lock().unwrap().remove(position_id);
        Ok(())
    }

    fn delete_account_event(&self, _account_id: &AccountId, _event_id: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn index_venue_order_id(
        &self,
        _client_order_id: ClientOrderId,
        _venue_order_id: VenueOrderId,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn index_order_position(
        &self,
        client_order_id: ClientOrderId,
        position_id: PositionId,
    ) -> anyhow::Result<()> {
        self.index_order_position
            .lock()
            .unwrap()
            .insert(client_order_id, position_id);
        Ok(())
    }

    fn update_actor(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn update_strategy(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn update_account(&self, account: &AccountAny) -> anyhow::Result<()> {
        self.add_account(account)
    }

    fn update_order(&self, _order_event: &OrderEventAny) -> anyhow::Result<()> {
        Ok(())
    }

    fn update_position(&self, position: &Position) -> anyhow::Result<()> {
        self.add_position(position)
    }

    fn snapshot_order_state(&self, _order: &OrderAny) -> anyhow::Result<()> {
        Ok(())
    }

    fn snapshot_position_state(&self, _position: &Position) -> anyhow::Result<()> {
        Ok(())
    }

    fn heartbeat(&self, _timestamp: UnixNanos) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axiom_model::{instruments::stubs::currency_pair_btcusdt, types::Currency};
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_add_and_load_currency() {
        let db = InMemoryCacheDatabase::new();
        let currency = Currency::AUD();
        db.add_currency(&currency).unwrap();

        let loaded = tokio_test_block_on(db.load_currency(&currency.code));
        assert_eq!(loaded.unwrap(), Some(currency));
    }

    #[rstest]
    fn test_add_and_load_instrument() {
        let db = InMemoryCacheDatabase::new();
        let instrument = currency_pair_btcusdt();
        db.add_instrument(&instrument).unwrap();

        let loaded = tokio_test_block_on(db.load_instrument(&instrument.id));
        assert_eq!(loaded.unwrap(), Some(instrument));
    }

    #[rstest]
    fn test_flush_clears_state() {
        let mut db = InMemoryCacheDatabase::new();
        let currency = Currency::AUD();
        db.add_currency(&currency).unwrap();
        db.flush().unwrap();

        let loaded = tokio_test_block_on(db.load_currencies());
        assert!(loaded.unwrap().is_empty());
    }

    fn tokio_test_block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }
}
