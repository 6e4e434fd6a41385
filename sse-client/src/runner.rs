use crate::error::Error;
use crate::registry::SubscriptionRegistry;
use crate::subscription::{StreamHandle, SubscriptionId};
use log::*;
use std::sync::Arc;

/// Launches stream consumption off the caller's request-handling path.
///
/// `launch` returns as soon as the subscription's consuming task is spawned
/// and its handle registered; stream-level outcomes are observed only through
/// the subscription's observer callbacks. Exactly one handle is created per
/// launch, and the registry keeps it reachable for cancellation.
pub struct Runner {
    registry: Arc<SubscriptionRegistry>,
}

impl Runner {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(SubscriptionRegistry::new()),
        }
    }

    /// Invokes a (non-blocking) subscribe operation and registers the handle
    /// it returns. The id is the owner's key for later cancellation.
    pub fn launch<F>(&self, subscribe: F) -> Result<SubscriptionId, Error>
    where
        F: FnOnce() -> Result<StreamHandle, Error>,
    {
        let handle = subscribe()?;
        let id = self.registry.register(handle);
        info!("Launched stream subscription {}", id.as_str());
        Ok(id)
    }

    /// Cancel one subscription by id.
    pub fn cancel(&self, id: &SubscriptionId) -> bool {
        self.registry.cancel(id)
    }

    /// Cancel every launched subscription.
    pub fn cancel_all(&self) {
        self.registry.cancel_all();
    }

    pub fn active_count(&self) -> usize {
        self.registry.active_count()
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::{StateCell, SubscriptionState};

    fn pending_handle() -> StreamHandle {
        let state = Arc::new(StateCell::new());
        let task = tokio::spawn(std::future::pending::<()>());
        StreamHandle::new(SubscriptionId::new(), state, task)
    }

    #[tokio::test]
    async fn launch_registers_exactly_one_handle() {
        let runner = Runner::new();

        let id = runner.launch(|| Ok(pending_handle())).unwrap();

        assert_eq!(runner.active_count(), 1);
        assert!(runner.cancel(&id));
        assert_eq!(runner.active_count(), 0);
    }

    #[tokio::test]
    async fn launch_propagates_subscribe_failures() {
        let runner = Runner::new();

        let result = runner.launch(|| Err(Error::decode("no stream")));

        assert!(result.is_err());
        assert_eq!(runner.active_count(), 0);
    }

    #[tokio::test]
    async fn cancelled_launches_end_in_the_cancelled_state() {
        let runner = Runner::new();
        let handle = pending_handle();
        let state = Arc::clone(handle.state_cell());

        let id = runner.launch(move || Ok(handle)).unwrap();
        runner.cancel(&id);

        assert_eq!(state.get(), SubscriptionState::Cancelled);
    }
}
