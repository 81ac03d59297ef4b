use std::fmt;

/// Lifecycle of a [`Broker`](super::Broker).
///
/// Transitions only move forward: `Idle -> Running -> ShuttingDown -> Closed`.
/// A broker whose signal fires before `start` goes straight to `Closed` once
/// started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BrokerState {
    Idle,
    Running,
    ShuttingDown,
    Closed,
}

impl BrokerState {
    pub fn is_closed(self) -> bool {
        self == BrokerState::Closed
    }
}

impl fmt::Display for BrokerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BrokerState::Idle => "idle",
            BrokerState::Running => "running",
            BrokerState::ShuttingDown => "shutting-down",
            BrokerState::Closed => "closed",
        };
        f.write_str(name)
    }
}
