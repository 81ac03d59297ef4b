use tokio::sync::{Semaphore, mpsc};
use tokio::sync::mpsc::error::TrySendError;

use crate::broker::message::Message;

/// Consumer side of a user's delivery queue.
pub type Inbox = mpsc::Receiver<Message>;

/// Result of a non-blocking enqueue into an [`Outbox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// The queue was at capacity; the message was skipped.
    Full,
    /// The inbox was dropped by its owner.
    Disconnected,
}

/// Producer side of a user's delivery queue, held by the broker.
///
/// Not `Clone`, and only built through [`Outbox::channel`], so the broker
/// owns the only sender and dropping the outbox ends the stream for the inbox.
#[derive(Debug)]
pub struct Outbox {
    sender: mpsc::Sender<Message>,
}

impl Outbox {
    /// Creates a bounded queue of `capacity` messages, clamped to at least
    /// one and at most `Semaphore::MAX_PERMITS`.
    pub fn channel(capacity: usize) -> (Outbox, Inbox) {
        let (sender, receiver) = mpsc::channel(clamp_capacity(capacity));
        (Outbox { sender }, receiver)
    }

    /// Enqueues without waiting. A full or disconnected queue never blocks
    /// the caller.
    pub fn try_deliver(&self, msg: Message) -> Delivery {
        match self.sender.try_send(msg) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Full(_)) => Delivery::Full,
            Err(TrySendError::Closed(_)) => Delivery::Disconnected,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Remaining free slots in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

/// Bounds a configured queue size to what a tokio channel accepts.
pub(crate) fn clamp_capacity(capacity: usize) -> usize {
    capacity.clamp(1, Semaphore::MAX_PERMITS)
}
