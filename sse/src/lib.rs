//! Core event model for the periodic SSE producer/consumer pair.
//!
//! This crate owns the parts of the system that are independent of any HTTP
//! framework: the domain event itself, the two wire encodings, and the paced
//! source that produces events.
//!
//! # Architecture
//!
//! - **Per-subscription tick state**: every call to [`source::EventSource::events`]
//!   starts its own sequence at tick 0. Nothing is shared between subscribers.
//! - **Two wire flavors**: a typed flavor carrying id/event-name/data per frame,
//!   and a plain flavor carrying only a payload string whose identity is
//!   positional.
//! - **Pure encoders**: encoding is deterministic given the same event, so a
//!   frame can be re-derived (and asserted on) from its `DomainEvent`.
//!
//! # Modules
//!
//! - `event`: `Tick`, `DomainEvent`, `WireEvent` and the two encoders
//! - `source`: `EventSource`, the lazy infinite paced stream of events

pub mod event;
pub mod source;

pub use event::{plain_payload, DomainEvent, Tick, WireEvent, PERIODIC_EVENT};
pub use source::EventSource;
