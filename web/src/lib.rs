//! HTTP layer for the periodic SSE pair: the producing stream endpoints, the
//! consumer trigger endpoints, and the routers wiring them up. Stream
//! semantics live in the `sse` and `sse-client` crates; this layer is glue.

pub mod controller;
pub mod router;

pub use service::AppState;
