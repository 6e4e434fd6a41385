//! Stream-consuming side of the periodic SSE pair.
//!
//! This crate provides everything needed to subscribe to the producing
//! endpoints and drive observer callbacks for each received item:
//!
//! - **Non-blocking subscribe**: every subscribe call spawns the consuming
//!   task and returns a [`StreamHandle`] immediately; the caller never waits
//!   on the (effectively unbounded) stream lifetime.
//! - **Three flavors**: typed SSE decode, plain payload decode, and a
//!   cross-flavor mode that applies typed framing to the plain endpoint.
//! - **One terminal outcome per handle**: a per-subscription state machine
//!   (`Active → Completed | Failed | Cancelled`) guarantees that completion
//!   and failure callbacks are mutually exclusive and fire at most once,
//!   with no item callbacks after either.
//! - **Reachable handles**: fire-and-forget launches go through
//!   [`Runner`], which registers every handle in a [`SubscriptionRegistry`]
//!   so it stays cancellable by its owner.
//!
//! Reconnection is deliberately disabled on the underlying transport: retry
//! policy belongs to whatever layers above `subscribe`, not to this crate.
//!
//! # Modules
//!
//! - `client`: [`StreamClient`] and the three subscription flavors
//! - `observer`: [`StreamObserver`] callbacks and the logging implementation
//! - `subscription`: [`StreamHandle`], ids and the subscription state machine
//! - `registry`: process-wide handle registry keyed by subscription id
//! - `runner`: fire-and-forget launch on top of the registry
//! - `error`: crate error type

pub mod client;
pub mod error;
pub mod observer;
pub mod registry;
pub mod runner;
pub mod subscription;

pub use client::StreamClient;
pub use error::{Error, ErrorKind};
pub use observer::{LogObserver, StreamObserver};
pub use registry::SubscriptionRegistry;
pub use runner::Runner;
pub use subscription::{StreamHandle, SubscriptionId, SubscriptionState};
