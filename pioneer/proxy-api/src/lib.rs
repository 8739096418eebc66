//! Offloads chain API calls to a worker task and marshals results back over a typed message
//! channel.
//!
//! The [`client::ProxyClient`] is the call/await facade handed to callers. Each call is wrapped in
//! a [`messages::ClientMessage`] envelope carrying a fresh correlation id, sent over the
//! [`channel`] and executed by the [`worker::ProxyWorker`] against the injected
//! [`chain::ChainApi`] connection. The worker answers with a [`messages::WorkerMessage`] carrying
//! the same id, which settles the pending call.
#![warn(clippy::missing_docs_in_private_items)]

/// Chain connection abstractions.
pub mod chain;
/// Typed message channel between client and worker.
pub mod channel;
/// Client side facade.
pub mod client;
/// Proxy configuration.
pub mod config;
/// Proxy errors.
pub mod errors;
/// Message envelopes.
pub mod messages;
#[cfg(test)]
mod tests;
/// Worker side proxy.
pub mod worker;
