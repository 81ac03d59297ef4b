//! The `console` module turns lines typed on a terminal into broker
//! operations for the `chatbroker` binary.
//!
//! ```text
//! /join alice        register alice with a printing inbox
//! /leave alice       unregister alice
//! @bob see you soon  directed message to bob
//! hello everyone     broadcast
//! /quit              shut the broker down
//! ```

pub mod command;

pub use command::{ConsoleCommand, ConsoleError};

#[cfg(test)]
mod tests;
