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

//! A price-time-priority limit order book with L1/L2/L3 granularity.
//!
//! [`OrderBook`] wraps a pair of [`Ladder`]s (one per side) and dispatches `add`/`update`/`delete`
//! through a [`BookType`](crate::enums::BookType) tag rather than through separate types, per the
//! "variant tag plus dispatch table" shape: a book never changes its type after construction, so
//! the tag is read once and the relevant branch taken on every mutation.

pub mod book;
pub mod ladder;
pub mod level;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

pub use crate::orderbook::{
    book::OrderBook,
    ladder::Ladder,
    level::{BookLevel, BookPrice},
};
