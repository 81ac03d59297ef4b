//! The `utils` module provides shared building blocks used across the
//! `chatbroker` crate.
//!
//! - `error`: the typed failure conditions returned by broker operations.
//! - `logging`: bootstraps the `tracing` subscriber for binaries and tests.
//! - `shutdown`: the cancellation signal that drives the broker lifecycle.

pub mod error;
pub mod logging;
pub mod shutdown;

#[cfg(test)]
mod tests;
