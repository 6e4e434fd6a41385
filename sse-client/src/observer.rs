use crate::error::Error;
use log::*;
use sse::event::WireEvent;

/// Callbacks driven by a consuming task for one subscription.
///
/// `on_item` is invoked once per received item in arrival order. `on_error`
/// and `on_complete` are terminal, mutually exclusive, and fire at most once;
/// no `on_item` call follows either. Invocations within one subscription are
/// strictly sequential.
pub trait StreamObserver<T>: Send + 'static {
    fn on_item(&self, item: T);
    fn on_error(&self, error: Error);
    fn on_complete(&self);
}

/// Observer that writes every outcome to the log, mirroring what an
/// interested operator would tail after hitting a launch endpoint.
pub struct LogObserver {
    label: String,
}

impl LogObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl StreamObserver<WireEvent> for LogObserver {
    fn on_item(&self, item: WireEvent) {
        info!(
            "[{}] Received SSE: name [{}], id [{}], content [{}]",
            self.label, item.event_type, item.id, item.data
        );
    }

    fn on_error(&self, error: Error) {
        error!("[{}] Error receiving SSE: {error}", self.label);
    }

    fn on_complete(&self) {
        info!("[{}] Completed!", self.label);
    }
}

impl StreamObserver<String> for LogObserver {
    fn on_item(&self, item: String) {
        info!("[{}] Received content: {item}", self.label);
    }

    fn on_error(&self, error: Error) {
        error!("[{}] Error retrieving content: {error}", self.label);
    }

    fn on_complete(&self) {
        info!("[{}] Completed!", self.label);
    }
}
