use chrono::{Local, NaiveTime};
use serde::Serialize;

/// Sequence number identifying an event within a single subscription.
/// Starts at 0 and increments by exactly 1 per emission.
pub type Tick = u64;

/// Event name carried by every frame of the typed stream flavor.
pub const PERIODIC_EVENT: &str = "periodic-event";

/// Wall-clock rendering used in both wire flavors (`HH:MM:SS.mmm`).
const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// A single emitted event. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainEvent {
    pub tick: Tick,
    pub emitted_at: NaiveTime,
}

impl DomainEvent {
    /// Stamps a new event with the current local time-of-day.
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            emitted_at: Local::now().time(),
        }
    }

    /// Builds an event with an explicit timestamp.
    pub fn at(tick: Tick, emitted_at: NaiveTime) -> Self {
        Self { tick, emitted_at }
    }

    /// Renders `emitted_at` the way both wire flavors embed it.
    pub fn timestamp(&self) -> String {
        self.emitted_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Wire representation of the typed stream flavor: one SSE frame with an
/// explicit id, event name and data payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireEvent {
    pub id: String,
    pub event_type: String,
    pub data: String,
}

impl WireEvent {
    /// Encodes a domain event into its typed wire form.
    pub fn encode(event: &DomainEvent) -> Self {
        Self {
            id: event.tick.to_string(),
            event_type: PERIODIC_EVENT.to_string(),
            data: format!("SSE - {}", event.timestamp()),
        }
    }
}

/// Encodes a domain event into the plain stream flavor's payload. The frame
/// carries no id or event name; identity is purely positional.
pub fn plain_payload(event: &DomainEvent) -> String {
    format!("Flux - {}", event.timestamp())
}
