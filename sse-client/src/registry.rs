use crate::subscription::{StreamHandle, SubscriptionId};
use dashmap::DashMap;
use log::*;

/// Process-wide registry of launched subscriptions, keyed by subscription id
/// for O(1) registration and cancellation.
///
/// Fire-and-forget launches must never turn into unreleasable resources:
/// every handle lands here, so its owner can always reach it to cancel.
pub struct SubscriptionRegistry {
    subscriptions: DashMap<SubscriptionId, StreamHandle>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            subscriptions: DashMap::new(),
        }
    }

    /// Register a launched subscription - O(1)
    pub fn register(&self, handle: StreamHandle) -> SubscriptionId {
        let id = handle.id().clone();
        self.subscriptions.insert(id.clone(), handle);
        id
    }

    /// Cancel and remove a subscription - O(1). Returns false if the id is
    /// unknown (already cancelled or never registered).
    pub fn cancel(&self, id: &SubscriptionId) -> bool {
        if let Some((_, handle)) = self.subscriptions.remove(id) {
            handle.cancel();
            debug!("Cancelled subscription {}", id.as_str());
            true
        } else {
            false
        }
    }

    /// Cancel every registered subscription. Used at shutdown so no consuming
    /// task outlives the process's interest in it.
    pub fn cancel_all(&self) {
        let ids: Vec<SubscriptionId> = self
            .subscriptions
            .iter()
            .map(|entry| entry.key().clone())
            .collect();

        for id in &ids {
            self.cancel(id);
        }

        if !ids.is_empty() {
            info!("Cancelled {} subscription(s)", ids.len());
        }
    }

    /// Number of registered subscriptions that have not reached a terminal
    /// state yet.
    pub fn active_count(&self) -> usize {
        self.subscriptions
            .iter()
            .filter(|entry| !entry.value().is_terminated())
            .count()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::SubscriptionState;
    use std::sync::Arc;

    fn pending_handle() -> StreamHandle {
        let state = Arc::new(crate::subscription::StateCell::new());
        let task = tokio::spawn(std::future::pending::<()>());
        StreamHandle::new(SubscriptionId::new(), state, task)
    }

    #[tokio::test]
    async fn register_then_cancel_removes_the_handle() {
        let registry = SubscriptionRegistry::new();
        let id = registry.register(pending_handle());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_count(), 1);

        assert!(registry.cancel(&id));
        assert!(registry.is_empty());
        assert!(!registry.cancel(&id));
    }

    #[tokio::test]
    async fn cancel_all_terminates_every_subscription() {
        let registry = SubscriptionRegistry::new();
        let handles = [pending_handle(), pending_handle(), pending_handle()];
        let states: Vec<_> = handles
            .iter()
            .map(|handle| Arc::clone(handle_state(handle)))
            .collect();

        for handle in handles {
            registry.register(handle);
        }

        registry.cancel_all();

        assert!(registry.is_empty());
        for state in states {
            assert_eq!(state.get(), SubscriptionState::Cancelled);
        }
    }

    #[tokio::test]
    async fn active_count_ignores_terminated_handles() {
        let registry = SubscriptionRegistry::new();
        let completed = pending_handle();
        handle_state(&completed).try_finish(SubscriptionState::Completed);

        registry.register(completed);
        registry.register(pending_handle());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_count(), 1);
    }

    fn handle_state(handle: &StreamHandle) -> &Arc<crate::subscription::StateCell> {
        handle.state_cell()
    }
}
