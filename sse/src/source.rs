use crate::event::{DomainEvent, Tick};
use async_stream::stream;
use futures::Stream;
use log::debug;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

/// Produces a lazy, infinite, time-paced sequence of [`DomainEvent`]s.
///
/// The first event becomes available one interval after the stream is first
/// polled (no immediate head element), each subsequent event one interval
/// after the previous. Every call to [`events`](EventSource::events) starts
/// an independent sequence at tick 0; the source itself never fails.
#[derive(Debug, Clone, Copy)]
pub struct EventSource {
    interval: Duration,
}

impl EventSource {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the infinite event stream. `MissedTickBehavior::Delay` keeps
    /// emissions at least one interval apart even if a consumer stalls and
    /// resumes; ticks are never burst back-to-back to catch up.
    pub fn events(self) -> impl Stream<Item = DomainEvent> {
        stream! {
            let start = time::Instant::now() + self.interval;
            let mut ticker = time::interval_at(start, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            debug!("Event source started: one event per {:?}", self.interval);

            let mut tick: Tick = 0;
            loop {
                ticker.tick().await;
                yield DomainEvent::new(tick);
                tick += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    const INTERVAL: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn first_event_arrives_only_after_one_interval() {
        let mut events = Box::pin(EventSource::new(INTERVAL).events());

        let start = time::Instant::now();
        let first = events.next().await.unwrap();

        assert_eq!(first.tick, 0);
        assert!(start.elapsed() >= INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_are_strictly_sequential_from_zero() {
        let mut events = Box::pin(EventSource::new(INTERVAL).events());

        for expected in 0..5 {
            assert_eq!(events.next().await.unwrap().tick, expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn events_are_paced_one_interval_apart() {
        let mut events = Box::pin(EventSource::new(INTERVAL).events());

        let start = time::Instant::now();
        events.next().await.unwrap();
        events.next().await.unwrap();
        events.next().await.unwrap();

        assert!(start.elapsed() >= 3 * INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn independent_streams_do_not_share_tick_state() {
        let source = EventSource::new(INTERVAL);
        let mut first = Box::pin(source.events());
        let mut second = Box::pin(source.events());

        assert_eq!(first.next().await.unwrap().tick, 0);
        assert_eq!(first.next().await.unwrap().tick, 1);
        assert_eq!(first.next().await.unwrap().tick, 2);

        // The second subscription begins its own count regardless of how far
        // the first has advanced.
        assert_eq!(second.next().await.unwrap().tick, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_consumer_does_not_cause_a_tick_burst() {
        let mut events = Box::pin(EventSource::new(INTERVAL).events());

        events.next().await.unwrap();
        // Consumer goes away for several intervals.
        time::sleep(5 * INTERVAL).await;

        let resumed_at = time::Instant::now();
        let next = events.next().await.unwrap();
        let after = events.next().await.unwrap();

        assert_eq!(next.tick, 1);
        assert_eq!(after.tick, 2);
        // No catch-up burst: the event after resumption is a full interval out.
        assert!(resumed_at.elapsed() >= INTERVAL);
    }
}
