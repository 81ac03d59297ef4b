//! The `broker` module contains the in-process chat message broker.
//!
//! Producers submit [`Message`]s through [`Broker::send_message`]; a single
//! dispatch task drains the bounded input queue and routes each message to
//! every registered user (broadcast) or to one addressed user (directed).

pub mod engine;
pub mod message;
pub mod registry;
pub mod state;

pub use engine::Broker;
pub use message::Message;
pub use state::BrokerState;

/// Identifier a user registers under.
pub type UserId = String;
