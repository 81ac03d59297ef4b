//! Cooperative cancellation for the broker.
//!
//! A [`ShutdownTrigger`] owns the sending half of a `watch` channel and every
//! [`ShutdownSignal`] observes it. Firing the trigger, or dropping it, is seen
//! by all signals at once.

use tokio::sync::watch;

/// Creates a connected trigger/signal pair.
pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownSignal { rx })
}

/// Fires the shutdown signal.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    /// Marks every connected signal as cancelled. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns another signal observing this trigger.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Observes a [`ShutdownTrigger`].
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Returns `true` once the trigger fired or was dropped.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Completes once the trigger fires or is dropped.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // Err means the trigger is gone, which counts as cancellation.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}
