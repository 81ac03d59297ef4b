//! Message definitions for the broker
//!
//! Notes on fields:
//! - `recipient`: only read when `broadcast` is false
//! - `timestamp`: seconds since UNIX epoch; `0` means "unset" and the broker
//!   fills it in on submit
//! - `message_id`: opaque unique id; the broker generates one if the
//!   producer does not provide it. Routing never looks at it.

use serde::{Deserialize, Serialize};

use crate::broker::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: UserId,
    #[serde(default)]
    pub recipient: UserId,
    pub content: String,
    #[serde(default)]
    pub broadcast: bool,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub message_id: String,
}

impl Message {
    /// A message for every registered user, the sender included.
    pub fn broadcast(sender: impl Into<UserId>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            recipient: UserId::new(),
            content: content.into(),
            broadcast: true,
            timestamp: 0,
            message_id: String::new(),
        }
    }

    /// A message addressed to a single user.
    pub fn direct(
        sender: impl Into<UserId>,
        recipient: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            content: content.into(),
            broadcast: false,
            timestamp: 0,
            message_id: String::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Fills the submit-time defaults: the current time when `timestamp` is
    /// zero and a fresh UUID when `message_id` is empty.
    pub(crate) fn stamp(&mut self) {
        if self.timestamp == 0 {
            self.timestamp = chrono::Utc::now().timestamp();
        }
        if self.message_id.is_empty() {
            self.message_id = uuid::Uuid::new_v4().to_string();
        }
    }
}
