use async_stream::stream;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};
use log::*;
use service::AppState;
use sse::event::{plain_payload, DomainEvent, WireEvent};
use sse::source::EventSource;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Frames buffered per connection before the client counts as stalled.
const STREAM_BUFFER: usize = 32;

/// GET an infinite typed event stream: one frame per interval carrying
/// id (decimal tick), event name and data.
#[utoipa::path(
    get,
    path = "/sse-server/stream-sse",
    responses(
        (status = 200, description = "Infinite stream of periodic-event frames, one per tick interval", content_type = "text/event-stream")
    )
)]
pub(crate) async fn stream_sse(
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Establishing typed SSE stream");

    event_stream(app_state.config.tick_interval(), |domain_event| {
        let wire = WireEvent::encode(&domain_event);
        Event::default()
            .id(wire.id)
            .event(wire.event_type)
            .data(wire.data)
    })
}

/// GET an infinite plain event stream: one frame per interval carrying only a
/// payload string, no id or event name.
#[utoipa::path(
    get,
    path = "/sse-server/stream-flux",
    responses(
        (status = 200, description = "Infinite stream of bare payload frames, one per tick interval", content_type = "text/event-stream")
    )
)]
pub(crate) async fn stream_flux(
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Establishing plain event stream");

    event_stream(app_state.config.tick_interval(), |domain_event| {
        Event::default().data(plain_payload(&domain_event))
    })
}

/// Binds a fresh event source to one connection and forwards its frames
/// through a bounded channel. The source task keeps ticking at wall-clock
/// cadence; a client that cannot drain `STREAM_BUFFER` frames gets its stream
/// terminated instead of slowing the source or losing items silently.
fn event_stream<F>(
    interval: Duration,
    to_frame: F,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    F: Fn(DomainEvent) -> Event + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Result<Event, Infallible>>(STREAM_BUFFER);

    tokio::spawn(async move {
        let mut events = Box::pin(EventSource::new(interval).events());

        while let Some(domain_event) = events.next().await {
            let tick = domain_event.tick;
            match tx.try_send(Ok(to_frame(domain_event))) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!("Stream client stalled at tick {tick}, terminating its stream");
                    break;
                }
                Err(TrySendError::Closed(_)) => {
                    debug!("Stream client disconnected at tick {tick}");
                    break;
                }
            }
        }
    });

    let stream = stream! {
        while let Some(event) = rx.recv().await {
            yield event;
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
