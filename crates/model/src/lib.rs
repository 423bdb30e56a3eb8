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

//! Domain model for the Axiom trading engine.
//!
//! This crate supplies the event-sourced aggregates and value types shared across the engine:
//!
//! - Fixed-point [`Price`](types::Price), [`Quantity`](types::Quantity), and
//!   [`Money`](types::Money) arithmetic.
//! - Strongly-typed identifiers for traders, strategies, instruments, and orders.
//! - Domain events (`OrderInitialized`, `OrderFilled`, `PositionOpened`, ...) that mutate
//!   aggregates only via `apply`.
//! - The [`Order`](orders::Order) state machine and its `OrderAny` family of concrete order
//!   types, dispatched through `enum_dispatch` rather than trait objects.
//! - [`OrderBook`](orderbook::OrderBook), supporting L1/L2/L3 granularity behind one type.
//! - The [`Position`](position::Position) and account aggregates.
//!
//! # Feature flags
//!
//! - `stubs`: Enables `rstest` fixture modules used by this crate's own tests and by downstream
//!   crates that need canned domain objects.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]

pub mod accounts;
pub mod currencies;
pub mod data;
pub mod enums;
pub mod events;
pub mod identifiers;
pub mod instruments;
pub mod orderbook;
pub mod orders;
pub mod position;
pub mod types;
