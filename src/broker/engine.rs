//! Broker engine
//!
//! This module contains the in-memory broker responsible for:
//! - accepting messages on a bounded input queue, with a timeout so that a
//!   saturated broker pushes back on producers instead of growing
//! - running a single dispatch task that routes each queued message in FIFO
//!   order to one or all registered users
//! - tracking user registration behind a reader/writer lock
//!
//! Concurrency and usage notes:
//! - `Broker` is `Send + Sync`; share it as `Arc<Broker>` between producers,
//!   the task that manages registrations, and whoever awaits shutdown.
//! - The registry lock is a `std::sync::RwLock` and is never held across an
//!   `.await`. Delivery into user outboxes is `try_send`, so a slow consumer
//!   can neither stall the dispatch task nor other consumers.
//! - Shutdown is driven by the [`ShutdownSignal`] passed at construction.
//!   Once it fires the dispatch task stops; messages still queued are dropped.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::broker::UserId;
use crate::broker::message::Message;
use crate::broker::registry::Registry;
use crate::broker::state::BrokerState;
use crate::client::outbox::clamp_capacity;
use crate::client::{Client, Outbox};
use crate::config::BrokerSettings;
use crate::utils::error::BrokerError;
use crate::utils::shutdown::ShutdownSignal;

/// Routes chat messages from any number of producers to registered users.
///
/// Owns the input queue, the user registry and the lifecycle state. Messages
/// are accepted by [`Broker::send_message`] and delivered by the dispatch
/// task spawned with [`Broker::start`].
#[derive(Debug)]
pub struct Broker {
    input: mpsc::Sender<Message>,
    /// Receiving half of the input queue until `start` hands it to the
    /// dispatch task.
    pending_input: Mutex<Option<mpsc::Receiver<Message>>>,
    shared: Arc<Shared>,
    shutdown: ShutdownSignal,
    submit_timeout: Duration,
}

/// State reachable from both the broker handle and its dispatch task.
#[derive(Debug)]
struct Shared {
    registry: RwLock<Registry>,
    state: watch::Sender<BrokerState>,
}

impl Broker {
    /// Number of messages the input queue holds before submitters wait.
    pub const DEFAULT_INPUT_CAPACITY: usize = 100;

    /// How long `send_message` waits for input capacity before giving up.
    pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(1);

    /// Creates an idle broker with the default queue capacity and timeout.
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self::with_settings(shutdown, &BrokerSettings::default())
    }

    /// Creates an idle broker using the configured input capacity and submit
    /// timeout. The capacity is clamped to what a tokio channel accepts.
    pub fn with_settings(shutdown: ShutdownSignal, settings: &BrokerSettings) -> Self {
        let (input, receiver) = mpsc::channel(clamp_capacity(settings.input_capacity));
        let (state, _) = watch::channel(BrokerState::Idle);

        Self {
            input,
            pending_input: Mutex::new(Some(receiver)),
            shared: Arc::new(Shared {
                registry: RwLock::new(Registry::new()),
                state,
            }),
            shutdown,
            submit_timeout: Duration::from_millis(settings.submit_timeout_ms),
        }
    }

    /// Spawns the dispatch task on the current tokio runtime.
    ///
    /// The task runs until the shutdown signal fires. A broker can only be
    /// started once.
    pub fn start(&self) -> Result<JoinHandle<()>, BrokerError> {
        let input = self
            .pending_input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(BrokerError::AlreadyStarted)?;

        self.shared.advance(BrokerState::Running);

        let shared = Arc::clone(&self.shared);
        let shutdown = self.shutdown.clone();
        Ok(tokio::spawn(dispatch_loop(shared, input, shutdown)))
    }

    /// Submits a message for routing.
    ///
    /// Fills in `timestamp` and `message_id` when unset, then waits up to the
    /// submit timeout for room in the input queue. Success means the message
    /// was queued; delivery to users is best-effort from there on.
    pub async fn send_message(&self, mut msg: Message) -> Result<(), BrokerError> {
        if self.state().is_closed() {
            return Err(BrokerError::Closed);
        }
        if self.shutdown.is_cancelled() {
            return Err(BrokerError::ShuttingDown);
        }

        msg.stamp();

        tokio::select! {
            biased;
            sent = self.input.send(msg) => sent.map_err(|_| BrokerError::Closed),
            _ = self.shutdown.cancelled() => Err(BrokerError::ShuttingDown),
            _ = tokio::time::sleep(self.submit_timeout) => {
                debug!(timeout = ?self.submit_timeout, "input queue full");
                Err(BrokerError::TooBusy)
            }
        }
    }

    /// Registers `outbox` as the delivery queue for `user_id`, replacing any
    /// previous registration.
    pub fn register_user(&self, user_id: impl Into<UserId>, outbox: Outbox) {
        let user_id = user_id.into();
        let mut registry = self.shared.write_registry();

        // The replaced outbox is dropped, not explicitly closed.
        if registry.insert(user_id.clone(), outbox).is_some() {
            warn!(user = %user_id, "user re-registered, previous outbox replaced");
        } else {
            debug!(user = %user_id, "user registered");
        }
    }

    /// Registers a [`Client`] under its own id; see [`Broker::register_user`].
    pub fn register_client(&self, client: Client) {
        self.register_user(client.id, client.outbox);
    }

    /// Removes `user_id` and closes its outbox. Unknown ids are ignored.
    pub fn unregister_user(&self, user_id: &str) {
        let removed = self.shared.write_registry().remove(user_id);

        if let Some(outbox) = removed {
            drop(outbox);
            debug!(user = %user_id, "user unregistered, outbox closed");
        }
    }

    /// Returns `true` when `user_id` currently has an outbox.
    pub fn is_registered(&self, user_id: &str) -> bool {
        self.shared.read_registry().contains(user_id)
    }

    /// Number of registered users.
    pub fn subscriber_count(&self) -> usize {
        self.shared.read_registry().len()
    }

    /// Ids of every registered user, in no particular order.
    pub fn user_ids(&self) -> Vec<UserId> {
        self.shared.read_registry().user_ids()
    }

    /// Current lifecycle state.
    ///
    /// Reports `ShuttingDown` as soon as the shutdown signal fires, even
    /// before the dispatch task (or a broker never started) has observed it.
    pub fn state(&self) -> BrokerState {
        let state = *self.shared.state.borrow();
        if state < BrokerState::ShuttingDown && self.shutdown.is_cancelled() {
            BrokerState::ShuttingDown
        } else {
            state
        }
    }

    /// Completes once the dispatch task has terminated.
    ///
    /// Only the dispatch task moves the broker to `Closed`, so on a broker
    /// that was never started this waits until `start` is called.
    pub async fn closed(&self) {
        let mut state = self.shared.state.subscribe();
        let _ = state.wait_for(|s| s.is_closed()).await;
    }
}

impl Shared {
    /// Moves the lifecycle forward; earlier states are never restored.
    fn advance(&self, next: BrokerState) {
        self.state.send_if_modified(|current| {
            if next > *current {
                *current = next;
                true
            } else {
                false
            }
        });
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, msg: &Message) {
        let report = self.read_registry().route(msg);

        if report.unknown_recipient {
            debug!(recipient = %msg.recipient, "unknown recipient, message dropped");
        }
        trace!(
            message_id = %msg.message_id,
            delivered = report.delivered,
            skipped = report.skipped_full + report.skipped_disconnected,
            "message dispatched"
        );
    }
}

async fn dispatch_loop(
    shared: Arc<Shared>,
    mut input: mpsc::Receiver<Message>,
    shutdown: ShutdownSignal,
) {
    info!(state = %BrokerState::Running, "broker dispatch loop started");

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                shared.advance(BrokerState::ShuttingDown);
                break;
            }
            next = input.recv() => match next {
                Some(msg) => shared.dispatch(&msg),
                None => break,
            },
        }
    }

    // Queued messages are discarded along with the receiver.
    input.close();
    let discarded = input.len();
    drop(input);

    shared.advance(BrokerState::Closed);
    info!(state = %BrokerState::Closed, discarded, "broker stopped");
}
