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

//! Configuration for the [`ExecutionEngine`](super::ExecutionEngine).

use serde::{Deserialize, Serialize};

/// Configuration for an [`ExecutionEngine`](super::ExecutionEngine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionEngineConfig {
    /// The bounded capacity of the engine's command/event queue.
    pub qsize: usize,
    /// If order events should be generated for position snapshots on flip/close.
    pub snapshot_positions: bool,
    /// If the engine should debug log every message it processes.
    pub debug: bool,
}

impl Default for ExecutionEngineConfig {
    fn default() -> Self {
        Self {
            qsize: 10_000,
            snapshot_positions: false,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_qsize_matches_documented_capacity() {
        assert_eq!(ExecutionEngineConfig::default().qsize, 10_000);
    }
}
