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

//! Configuration for the [`RiskEngine`](super::RiskEngine).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for a [`RiskEngine`](super::RiskEngine).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskEngineConfig {
    /// The bounded capacity of the engine's command/event queue.
    pub qsize: usize,
    /// If all pre-trade risk checks are bypassed (commands pass straight through).
    pub bypass: bool,
    /// The maximum notional value permitted for a single order, if enforced.
    pub max_notional_per_order: Option<Decimal>,
    /// The maximum number of order submissions permitted per minute, if enforced.
    pub max_order_submit_rate: Option<u32>,
    /// If the engine should debug log every message it processes.
    pub debug: bool,
}

impl Default for RiskEngineConfig {
    fn default() -> Self {
        Self {
            qsize: 10_000,
            bypass: false,
            max_notional_per_order: None,
            max_order_submit_rate: None,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_qsize_matches_documented_capacity() {
        assert_eq!(RiskEngineConfig::default().qsize, 10_000);
    }

    #[test]
    fn test_default_does_not_bypass_checks() {
        assert!(!RiskEngineConfig::default().bypass);
    }
}
