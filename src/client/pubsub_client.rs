use crate::broker::UserId;
use crate::client::outbox::{Inbox, Outbox};

/// A chat participant as seen by the broker.
///
/// Pairs the user's identifier with the outbox the broker delivers into.
#[derive(Debug)]
pub struct Client {
    /// Unique identifier for the user (e.g. the authenticated user name).
    pub id: UserId,

    /// Queue the broker delivers this user's messages into.
    pub outbox: Outbox,
}

impl Client {
    /// Creates a client with a fresh bounded queue and hands back the inbox
    /// the caller should drain.
    pub fn new(id: impl Into<UserId>, capacity: usize) -> (Client, Inbox) {
        let (outbox, inbox) = Outbox::channel(capacity);
        (
            Client {
                id: id.into(),
                outbox,
            },
            inbox,
        )
    }
}
