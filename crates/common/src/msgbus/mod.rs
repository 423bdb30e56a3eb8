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

//! A common in-memory `MessageBus` for loosely coupled message passing patterns.
//!
//! Endpoints are addressed by name and hold at most one handler; publishing to a
//! topic fans out to every handler subscribed under that exact topic. The bus is
//! thread-local: each OS thread gets its own registry, so handlers never need to be
//! `Send`/`Sync`.

pub mod database;
pub mod handler;
pub mod switchboard;

#[cfg(any(test, feature = "stubs"))]
#[cfg_attr(docsrs, doc(cfg(feature = "stubs")))]
pub mod stubs;

use std::{cell::RefCell, collections::HashMap};

use handler::ShareableMessageHandler;
use ustr::Ustr;

thread_local! {
    static ENDPOINTS: RefCell<HashMap<Ustr, ShareableMessageHandler>> = RefCell::new(HashMap::new());
    static SUBSCRIPTIONS: RefCell<HashMap<Ustr, Vec<ShareableMessageHandler>>> = RefCell::new(HashMap::new());
}

/// Registers `handler` to receive point-to-point sends addressed to `endpoint`.
///
/// A later registration for the same endpoint replaces the previous handler.
pub fn register<T: AsRef<str>>(endpoint: T, handler: ShareableMessageHandler) {
    let endpoint = Ustr::from(endpoint.as_ref());
    ENDPOINTS.with_borrow_mut(|endpoints| {
        endpoints.insert(endpoint, handler);
    });
}

/// Removes any handler registered for `endpoint`.
pub fn deregister<T: AsRef<str>>(endpoint: T) {
    let endpoint = Ustr::from(endpoint.as_ref());
    ENDPOINTS.with_borrow_mut(|endpoints| {
        endpoints.remove(&endpoint);
    });
}

/// Sends `message` to the handler registered at `endpoint`, if any.
pub fn send(endpoint: &Ustr, message: &dyn std::any::Any) {
    let handler = ENDPOINTS.with_borrow(|endpoints| endpoints.get(endpoint).cloned());
    match handler {
        Some(handler) => handler.0.handle(message),
        None => log::debug!("No handler registered for endpoint '{endpoint}'"),
    }
}

/// Sends `message` to `endpoint`, converting it from any `AsRef<str>` source first.
pub fn send_any<T: AsRef<str>>(endpoint: T, message: &dyn std::any::Any) {
    send(&Ustr::from(endpoint.as_ref()), message);
}

/// Registers `handler` as a subscriber of `topic`.
pub fn subscribe<T: AsRef<str>>(topic: T, handler: ShareableMessageHandler) {
    let topic = Ustr::from(topic.as_ref());
    SUBSCRIPTIONS.with_borrow_mut(|subs| {
        subs.entry(topic).or_default().push(handler);
    });
}

/// Publishes `message` to every handler subscribed to `topic`.
pub fn publish(topic: &Ustr, message: &dyn std::any::Any) {
    SUBSCRIPTIONS.with_borrow(|subs| {
        if let Some(handlers) = subs.get(topic) {
            for handler in handlers {
                handler.0.handle(message);
            }
        }
    });
}

/// Clears all registered endpoints and subscriptions on the current thread.
///
/// Intended for test isolation between cases that share thread-local state.
pub fn clear() {
    ENDPOINTS.with_borrow_mut(HashMap::clear);
    SUBSCRIPTIONS.with_borrow_mut(HashMap::clear);
}
