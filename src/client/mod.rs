//! The `client` module defines how a user's delivery queue is represented.
//!
//! Each registered user owns an [`Inbox`] it drains, while the broker holds
//! the matching [`Outbox`] and is the only party that enqueues into it.

pub mod outbox;
pub mod pubsub_client;

pub use outbox::{Inbox, Outbox};
pub use pubsub_client::Client;
