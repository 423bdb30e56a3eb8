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

//! Order command messages accepted by the matching engine.

pub mod cancel;
pub mod cancel_all;
pub mod cancel_batch;
pub mod modify;
pub mod query;
pub mod reports;
pub mod submit;
pub mod submit_list;

// Re-exports
pub use self::{
    cancel::CancelOrder,
    cancel_all::CancelAllOrders,
    cancel_batch::{BatchCancelOrders, CancelOrderId},
    modify::ModifyOrder,
    query::QueryOrder,
    submit::SubmitOrder,
    submit_list::SubmitOrderList,
};
