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

use serde::{Deserialize, Serialize};

/// Configuration for streaming backtest results out to the event-sourced store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// The directory path under which streamed results are written.
    pub catalog_path: String,
    /// The number of events buffered in memory before each flush to the store.
    pub flush_interval_events: usize,
    /// If persisted data should also include market data (ticks, bars, order book deltas).
    pub include_market_data: bool,
    /// If the catalog directory should be cleared before the run starts.
    pub clear_on_start: bool,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            catalog_path: String::from("catalog"),
            flush_interval_events: 5_000,
            include_market_data: false,
            clear_on_start: false,
        }
    }
}

impl StreamingConfig {
    /// Creates a new [`StreamingConfig`] instance.
    #[must_use]
    pub fn new(
        catalog_path: String,
        flush_interval_events: Option<usize>,
        include_market_data: Option<bool>,
        clear_on_start: Option<bool>,
    ) -> Self {
        Self {
            catalog_path,
            flush_interval_events: flush_interval_events.unwrap_or(5_000),
            include_market_data: include_market_data.unwrap_or(false),
            clear_on_start: clear_on_start.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_streaming_config() {
        let config = StreamingConfig::default();
        assert_eq!(config.catalog_path, "catalog");
        assert_eq!(config.flush_interval_events, 5_000);
        assert!(!config.include_market_data);
    }
}
