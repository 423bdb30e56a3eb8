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

//! A custom signal data type, typically emitted by a strategy or indicator.

use axiom_core::UnixNanos;
use serde::{Deserialize, Serialize};

/// Represents a named signal value, timestamped at the point of occurrence and initialization.
#[repr(C)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "python",
    pyo3::pyclass(module = "nautilus_trader.core.nautilus_pyo3.common")
)]
pub struct Signal {
    /// The signal name.
    pub name: String,
    /// The signal value.
    pub value: f64,
    /// UNIX timestamp (nanoseconds) when the signal event occurred.
    pub ts_event: UnixNanos,
    /// UNIX timestamp (nanoseconds) when the struct was initialized.
    pub ts_init: UnixNanos,
}

impl Signal {
    /// Creates a new [`Signal`] instance.
    #[must_use]
    pub const fn new(name: String, value: f64, ts_event: UnixNanos, ts_init: UnixNanos) -> Self {
        Self {
            name,
            value,
            ts_event,
            ts_init,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_signal() {
        let signal = Signal::new("signal_1".to_string(), 1.0, 1.into(), 2.into());
        assert_eq!(signal.name, "signal_1");
        assert_eq!(signal.value, 1.0);
        assert_eq!(signal.ts_event, 1.into());
        assert_eq!(signal.ts_init, 2.into());
    }
}
