//! # chatbroker
//!
//! `chatbroker` is an in-process publish/subscribe router for chat messages.
//! Producers submit messages onto a bounded input queue and a single
//! dispatch task fans them out to per-user queues, either to everyone
//! (broadcast) or to one addressed user (directed). Delivery never blocks on
//! a slow consumer, and a saturated broker pushes back on producers with a
//! timeout instead of growing without bound.
//!
//! ## Core Modules
//!
//! - `broker`: the `Broker` engine, messages, the user registry and lifecycle state.
//! - `client`: the per-user delivery queues (`Outbox` / `Inbox`).
//! - `config`: loading settings from defaults, a TOML file and the environment.
//! - `console`: the line-command parser behind the `chatbroker` binary.
//! - `utils`: error types, logging bootstrap and the shutdown signal.

pub mod broker;
pub mod client;
pub mod config;
pub mod console;
pub mod utils;

#[cfg(test)]
mod tests;
