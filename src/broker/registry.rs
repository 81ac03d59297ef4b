use std::collections::HashMap;

use tracing::debug;

use crate::broker::UserId;
use crate::broker::message::Message;
use crate::client::outbox::{Delivery, Outbox};

/// Maps each registered user to the outbox the broker delivers into.
///
/// Holds at most one outbox per user id. The registry itself is not
/// synchronized; the broker guards it with a reader/writer lock so lookups
/// during dispatch can overlap while registration is exclusive.
#[derive(Debug, Default)]
pub struct Registry {
    users: HashMap<UserId, Outbox>,
}

/// Outcome counts for routing a single message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RouteReport {
    pub delivered: usize,
    pub skipped_full: usize,
    pub skipped_disconnected: usize,
    /// Directed message whose recipient is not registered.
    pub unknown_recipient: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    /// Inserts `outbox` for `user_id` and returns the outbox it replaced.
    pub fn insert(&mut self, user_id: UserId, outbox: Outbox) -> Option<Outbox> {
        self.users.insert(user_id, outbox)
    }

    pub fn remove(&mut self, user_id: &str) -> Option<Outbox> {
        self.users.remove(user_id)
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.users.contains_key(user_id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn user_ids(&self) -> Vec<UserId> {
        self.users.keys().cloned().collect()
    }

    /// Routes `msg` without blocking: to every outbox when it is a broadcast,
    /// otherwise to the recipient's outbox if one is registered.
    pub fn route(&self, msg: &Message) -> RouteReport {
        let mut report = RouteReport::default();

        if msg.broadcast {
            for (user_id, outbox) in &self.users {
                report.record(user_id, outbox.try_deliver(msg.clone()));
            }
        } else if let Some(outbox) = self.users.get(&msg.recipient) {
            report.record(&msg.recipient, outbox.try_deliver(msg.clone()));
        } else {
            report.unknown_recipient = true;
        }

        report
    }
}

impl RouteReport {
    fn record(&mut self, user_id: &str, delivery: Delivery) {
        match delivery {
            Delivery::Delivered => self.delivered += 1,
            Delivery::Full => {
                debug!(user = %user_id, "outbox full, message skipped");
                self.skipped_full += 1;
            }
            Delivery::Disconnected => {
                debug!(user = %user_id, "inbox dropped, message skipped");
                self.skipped_disconnected += 1;
            }
        }
    }
}
