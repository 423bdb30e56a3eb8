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

//! Core foundational types and utilities for the Axiom trading engine.
//!
//! The *core* crate is designed to be lightweight, efficient, and to provide zero-cost abstractions
//! wherever possible. It supplies the essential building blocks used across the Axiom
//! workspace, including:
//!
//! - Time handling and atomic clock functionality.
//! - UUID generation and management.
//! - Mathematical functions and interpolation utilities.
//! - Correctness validation functions.
//! - Serialization traits and helpers.
//! - Cross-platform environment utilities.
//! - Abstractions over common collections.
//!
//! # Platform
//!
//! Axiom is an event-driven order book, matching engine, and risk/execution message-processing
//! core intended to simulate (for backtests) and police (for live trading) order flow against
//! market data, with no code changes required between the two modes.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod collections;
pub mod consts;
pub mod correctness;
pub mod datetime;
pub mod env;
pub mod math;
pub mod message;
pub mod nanos;
pub mod parsing;
pub mod paths;
pub mod serialization;
pub mod shared;
pub mod time;
pub mod uuid;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
compile_error!("Unsupported platform: Axiom supports only Linux, macOS, and Windows");

// Re-exports
pub use crate::{
    nanos::UnixNanos,
    shared::{SharedCell, WeakCell},
    time::AtomicTime,
    uuid::UUID4,
};
