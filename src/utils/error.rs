//! The `error` module defines the failure conditions surfaced by the broker.
//!
//! Routing outcomes such as an unknown recipient or a full subscriber queue
//! are not errors: the producer's acknowledgment point is the input queue,
//! so those are logged and dropped instead.

use thiserror::Error;

/// Failures returned synchronously to the caller of a broker operation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BrokerError {
    /// The shutdown signal has fired; no new messages are accepted.
    #[error("broker shutting down")]
    ShuttingDown,

    /// The dispatch loop has terminated.
    #[error("broker closed")]
    Closed,

    /// The input queue stayed full for the whole submit timeout.
    #[error("broker too busy")]
    TooBusy,

    /// `start` was called on a broker whose dispatch loop already runs.
    #[error("broker dispatch loop already started")]
    AlreadyStarted,
}

impl BrokerError {
    /// Returns `true` for the conditions caused by the broker lifecycle
    /// ending, as opposed to transient backpressure.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, BrokerError::ShuttingDown | BrokerError::Closed)
    }
}
