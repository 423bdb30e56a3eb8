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

//! A per-currency account balance, split into total, locked and free components.

use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Represents a single currency balance for an account.
///
/// `total` always equals `free + locked`; this is enforced at construction rather than
/// recomputed on every access since the three components are set together whenever an account
/// applies a new [`AccountState`](crate::events::AccountState) event.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The total balance.
    pub total: Money,
    /// The balance locked (held against open orders or positions).
    pub locked: Money,
    /// The balance free for trading.
    pub free: Money,
}

impl AccountBalance {
    /// Creates a new [`AccountBalance`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `total`, `locked` and `free` are not all denominated in the same currency, or if
    /// `total != locked + free`.
    #[must_use]
    pub fn new(total: Money, locked: Money, free: Money) -> Self {
        assert_eq!(
            total.currency, locked.currency,
            "currency mismatch constructing `AccountBalance`"
        );
        assert_eq!(
            total.currency, free.currency,
            "currency mismatch constructing `AccountBalance`"
        );
        assert_eq!(
            total.raw,
            locked.raw + free.raw,
            "invalid `AccountBalance`, total must equal locked + free"
        );
        Self {
            total,
            locked,
            free,
        }
    }
}

impl Display for AccountBalance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(total={}, locked={}, free={})",
            stringify!(AccountBalance),
            self.total,
            self.locked,
            self.free
        )
    }
}

impl Debug for AccountBalance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
