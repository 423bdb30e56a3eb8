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

//! A single-consumer, cooperatively-scheduled execution engine.
//!
//! One instance owns a bounded FIFO queue shared by commands flowing in and events flowing out;
//! a single consumer task drains it on a cooperative event loop. The risk engine is built from
//! the same shape atop its own command/event pair.

pub mod config;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use axiom_common::messages::{ExecutionEvent, execution::TradingCommand};
use tokio::sync::mpsc::{self, error::TrySendError};

pub use self::config::ExecutionEngineConfig;

/// A unit of work moving through an [`ExecutionEngine`]'s queue.
#[derive(Debug)]
pub enum Message {
    Command(TradingCommand),
    Event(ExecutionEvent),
}

/// Receives dispatched commands and events from the engine's consumer loop.
///
/// Implementors run on the engine's single consumer task, so handlers must not block; any
/// blocking I/O belongs behind an async boundary invoked from here.
pub trait MessageHandler: Send + 'static {
    fn handle_command(&mut self, command: TradingCommand);
    fn handle_event(&mut self, event: ExecutionEvent);
}

/// A bounded, single-consumer command/event engine.
///
/// Mirrors the shape described for the execution and risk engines: `execute`/`process` enqueue,
/// `start` spawns the consumer, `stop` asks it to drain and exit via a sentinel, `kill` cancels
/// it outright. `None` on the underlying channel is the reserved shutdown sentinel.
#[derive(Debug)]
pub struct ExecutionEngine {
    config: ExecutionEngineConfig,
    tx: mpsc::Sender<Option<Message>>,
    rx: Option<mpsc::Receiver<Option<Message>>>,
    is_running: Arc<AtomicBool>,
    consumer_task: Option<tokio::task::JoinHandle<()>>,
}

impl ExecutionEngine {
    #[must_use]
    pub fn new(config: ExecutionEngineConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.qsize);
        Self {
            config,
            tx,
            rx: Some(rx),
            is_running: Arc::new(AtomicBool::new(false)),
            consumer_task: None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Current queue depth.
    #[must_use]
    pub fn qsize(&self) -> usize {
        self.config.qsize.saturating_sub(self.tx.capacity())
    }

    /// Enqueues a command. On a full queue this warns and performs a blocking enqueue: the
    /// caller yields cooperatively until space appears.
    pub async fn execute(&self, command: TradingCommand) {
        self.enqueue(Message::Command(command)).await;
    }

    /// Enqueues an event. Same blocking-on-full behavior as [`Self::execute`].
    pub async fn process(&self, event: ExecutionEvent) {
        self.enqueue(Message::Event(event)).await;
    }

    async fn enqueue(&self, message: Message) {
        match self.tx.try_send(Some(message)) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                log::warn!(
                    "execution engine queue full at capacity {}; blocking enqueue",
                    self.config.qsize
                );
                if self.tx.send(message).await.is_err() {
                    log::error!("execution engine queue closed while enqueuing");
                }
            }
            Err(TrySendError::Closed(_)) => {
                log::error!("execution engine queue closed; message dropped");
            }
        }
    }

    /// Marks the engine running and spawns its consumer task.
    ///
    /// # Panics
    ///
    /// Panics if the engine has already been started (the receiver half is consumed by the
    /// first call).
    pub fn start<H: MessageHandler>(&mut self, mut handler: H) {
        self.is_running.store(true, Ordering::SeqCst);
        let mut rx = self.rx.take().expect("engine already started");
        let running = self.is_running.clone();
        let task = tokio::task::spawn(async move {
            loop {
                match rx.recv().await {
                    Some(Some(message)) => match message {
                        Message::Command(command) => handler.handle_command(command),
                        Message::Event(event) => handler.handle_event(event),
                    },
                    Some(None) => {
                        if !running.load(Ordering::SeqCst) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            let residual = rx.len();
            if residual > 0 {
                log::warn!("execution engine consumer exiting with {residual} residual messages");
            }
        });
        self.consumer_task = Some(task);
    }

    /// Marks the engine not-running and pushes the shutdown sentinel so the consumer wakes,
    /// observes the flag, and exits at its next loop iteration.
    ///
    /// If the engine was already stopped (in particular by a prior [`Self::kill`], which clears
    /// the flag itself before delegating here), no sentinel is pushed: the consumer task is
    /// already gone or already exiting, and pushing would just leave an orphaned message behind.
    pub fn stop(&self) {
        if !self.is_running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.tx.try_send(None) {
            log::warn!("failed to push execution engine shutdown sentinel: {e}");
        }
    }

    /// Cancels the consumer task abruptly and discards residual messages (count logged).
    ///
    /// Clears the running flag before calling [`Self::stop`], so that call's sentinel push is
    /// suppressed — the task is already being aborted, so there's no consumer left to observe it.
    pub fn kill(&mut self) {
        self.is_running.store(false, Ordering::SeqCst);
        let residual = self.qsize();
        if let Some(task) = self.consumer_task.take() {
            task.abort();
        }
        if residual > 0 {
            log::warn!("killed execution engine consumer task; discarding {residual} residual messages");
        }
        self.stop();
    }
}
