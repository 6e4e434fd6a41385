use crate::error::Error;
use crate::observer::StreamObserver;
use crate::subscription::{StateCell, StreamHandle, SubscriptionId, SubscriptionState};
use eventsource_client::{self as es, Client};
use futures_util::stream::StreamExt;
use log::*;
use sse::event::WireEvent;
use std::sync::Arc;

const TYPED_STREAM_PATH: &str = "stream-sse";
const PLAIN_STREAM_PATH: &str = "stream-flux";

/// Connection factory for the producing endpoints. Constructed once at
/// startup and shared process-wide; every subscribe call opens its own
/// independent connection.
///
/// All subscribe operations are non-blocking: the network connection and
/// decoding proceed on a spawned task, and the returned [`StreamHandle`] is
/// the owner's only way to cancel the stream. Automatic reconnection is
/// disabled; a retry policy, if wanted, belongs to a layer above this one.
pub struct StreamClient {
    base_url: String,
}

impl StreamClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Subscribes to the typed stream endpoint, decoding each frame as a
    /// [`WireEvent`] with id, event name and data.
    pub fn subscribe_typed<O>(&self, observer: O) -> Result<StreamHandle, Error>
    where
        O: StreamObserver<WireEvent>,
    {
        self.spawn_consumer(TYPED_STREAM_PATH, typed_event, observer)
    }

    /// Subscribes to the plain stream endpoint, surfacing each frame's
    /// payload as a bare string. Identity is positional; frame id and event
    /// name are never exposed.
    pub fn subscribe_plain<O>(&self, observer: O) -> Result<StreamHandle, Error>
    where
        O: StreamObserver<String>,
    {
        self.spawn_consumer(PLAIN_STREAM_PATH, |frame| Ok(frame.data.clone()), observer)
    }

    /// Subscribes to the plain stream endpoint but decodes its frames with
    /// typed framing. Frames there carry no id or event name, so those fields
    /// come back empty or defaulted and only `data` is meaningful.
    pub fn subscribe_typed_from_plain<O>(&self, observer: O) -> Result<StreamHandle, Error>
    where
        O: StreamObserver<WireEvent>,
    {
        self.spawn_consumer(PLAIN_STREAM_PATH, lenient_typed_event, observer)
    }

    fn stream_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn spawn_consumer<T, D, O>(&self, path: &str, decode: D, observer: O) -> Result<StreamHandle, Error>
    where
        T: Send + 'static,
        D: Fn(&es::Event) -> Result<T, Error> + Send + 'static,
        O: StreamObserver<T>,
    {
        let url = self.stream_url(path);
        let client = es::ClientBuilder::for_url(&url)?
            .reconnect(es::ReconnectOptions::reconnect(false).build())
            .build();

        let id = SubscriptionId::new();
        let state = Arc::new(StateCell::new());
        let task_state = Arc::clone(&state);

        debug!("Subscribing to {url}");

        let task = tokio::spawn(async move {
            let mut stream = client.stream();

            loop {
                if !task_state.is_active() {
                    break;
                }

                match stream.next().await {
                    Some(Ok(es::SSE::Event(frame))) => match decode(&frame) {
                        Ok(item) => {
                            // Re-check so nothing is dispatched once the owner
                            // cancelled while we were waiting on the transport.
                            if task_state.is_active() {
                                observer.on_item(item);
                            } else {
                                break;
                            }
                        }
                        Err(e) => {
                            if task_state.try_finish(SubscriptionState::Failed) {
                                observer.on_error(e);
                            }
                            break;
                        }
                    },
                    Some(Ok(es::SSE::Comment(_))) => {
                        // Ignore comments (keep-alive)
                    }
                    Some(Err(e)) => {
                        if task_state.try_finish(SubscriptionState::Failed) {
                            observer.on_error(Error::connect(e));
                        }
                        break;
                    }
                    None => {
                        if task_state.try_finish(SubscriptionState::Completed) {
                            observer.on_complete();
                        }
                        break;
                    }
                }
            }
        });

        Ok(StreamHandle::new(id, state, task))
    }
}

/// Strict typed decode: a typed frame without an id has lost its identity and
/// is treated as a framing mismatch.
fn typed_event(frame: &es::Event) -> Result<WireEvent, Error> {
    typed_event_from_parts(frame.id.as_deref(), &frame.event_type, &frame.data)
}

/// Cross-flavor decode: id and event name may legitimately be absent.
fn lenient_typed_event(frame: &es::Event) -> Result<WireEvent, Error> {
    Ok(typed_event_from_parts_lenient(
        frame.id.as_deref(),
        &frame.event_type,
        &frame.data,
    ))
}

fn typed_event_from_parts(
    id: Option<&str>,
    event_type: &str,
    data: &str,
) -> Result<WireEvent, Error> {
    let id = id
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::decode("typed event frame is missing an id"))?;

    Ok(WireEvent {
        id: id.to_string(),
        event_type: event_type.to_string(),
        data: data.to_string(),
    })
}

fn typed_event_from_parts_lenient(id: Option<&str>, event_type: &str, data: &str) -> WireEvent {
    WireEvent {
        id: id.unwrap_or_default().to_string(),
        event_type: event_type.to_string(),
        data: data.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sse::event::PERIODIC_EVENT;

    #[test]
    fn typed_decode_round_trips_an_encoded_event() {
        let event = sse::event::DomainEvent::at(
            5,
            chrono_time(14, 30, 45, 123),
        );
        let encoded = WireEvent::encode(&event);

        let decoded = typed_event_from_parts(
            Some(&encoded.id),
            &encoded.event_type,
            &encoded.data,
        )
        .unwrap();

        assert_eq!(decoded.id, "5");
        assert_eq!(decoded.event_type, PERIODIC_EVENT);
        assert_eq!(decoded.data, "SSE - 14:30:45.123");
        assert_eq!(decoded, encoded);
    }

    #[test]
    fn typed_decode_rejects_a_frame_without_an_id() {
        let missing = typed_event_from_parts(None, PERIODIC_EVENT, "SSE - 00:00:00.000");
        let empty = typed_event_from_parts(Some(""), PERIODIC_EVENT, "SSE - 00:00:00.000");

        assert!(missing.is_err());
        assert!(empty.is_err());
    }

    #[test]
    fn lenient_decode_tolerates_absent_identity() {
        let decoded = typed_event_from_parts_lenient(None, "message", "Flux - 00:00:01.000");

        assert_eq!(decoded.id, "");
        assert_eq!(decoded.event_type, "message");
        assert_eq!(decoded.data, "Flux - 00:00:01.000");
    }

    #[test]
    fn stream_urls_join_regardless_of_trailing_slash() {
        let bare = StreamClient::new("http://localhost:8081/sse-server");
        let trailing = StreamClient::new("http://localhost:8081/sse-server/");

        assert_eq!(
            bare.stream_url(TYPED_STREAM_PATH),
            "http://localhost:8081/sse-server/stream-sse"
        );
        assert_eq!(
            trailing.stream_url(PLAIN_STREAM_PATH),
            "http://localhost:8081/sse-server/stream-flux"
        );
    }

    fn chrono_time(h: u32, m: u32, s: u32, milli: u32) -> chrono::NaiveTime {
        chrono::NaiveTime::from_hms_milli_opt(h, m, s, milli).unwrap()
    }
}
