use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Unique identifier for a subscription (client-generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a single subscription. The only legal transitions are out of
/// `Active`; terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubscriptionState {
    Active = 0,
    /// The server closed the stream cleanly.
    Completed = 1,
    /// The stream terminated abnormally (transport or decode failure).
    Failed = 2,
    /// The owner cancelled the subscription.
    Cancelled = 3,
}

impl SubscriptionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Active,
            1 => Self::Completed,
            2 => Self::Failed,
            _ => Self::Cancelled,
        }
    }
}

/// Shared state cell enforcing the subscription state machine. The consuming
/// task and the handle's owner race on it; compare-exchange guarantees that
/// exactly one terminal transition wins.
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(SubscriptionState::Active as u8))
    }

    pub(crate) fn get(&self) -> SubscriptionState {
        SubscriptionState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.get() == SubscriptionState::Active
    }

    /// Attempts the `Active -> target` transition. Returns true iff this call
    /// performed it; a subscription that is already terminal is left alone.
    pub(crate) fn try_finish(&self, target: SubscriptionState) -> bool {
        debug_assert!(target != SubscriptionState::Active);
        self.0
            .compare_exchange(
                SubscriptionState::Active as u8,
                target as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

/// An open subscription. Owns the cancellation capability; whoever holds the
/// handle is the only party able to cancel the stream.
#[derive(Debug)]
pub struct StreamHandle {
    id: SubscriptionId,
    state: Arc<StateCell>,
    task: JoinHandle<()>,
}

impl StreamHandle {
    pub(crate) fn new(id: SubscriptionId, state: Arc<StateCell>, task: JoinHandle<()>) -> Self {
        Self { id, state, task }
    }

    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    pub fn state(&self) -> SubscriptionState {
        self.state.get()
    }

    pub(crate) fn state_cell(&self) -> &Arc<StateCell> {
        &self.state
    }

    pub fn is_terminated(&self) -> bool {
        !self.state.is_active()
    }

    /// Cancels the subscription: transitions `Active -> Cancelled` and aborts
    /// the consuming task, releasing the underlying connection. Idempotent;
    /// has no effect once the subscription reached any terminal state. After
    /// cancellation no further observer callback fires (at most the single
    /// dispatch already in flight completes).
    pub fn cancel(&self) {
        if self.state.try_finish(SubscriptionState::Cancelled) {
            self.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_handle() -> StreamHandle {
        let state = Arc::new(StateCell::new());
        let task = tokio::spawn(std::future::pending::<()>());
        StreamHandle::new(SubscriptionId::new(), state, task)
    }

    #[test]
    fn state_cell_allows_exactly_one_terminal_transition() {
        let cell = StateCell::new();

        assert!(cell.try_finish(SubscriptionState::Completed));
        assert!(!cell.try_finish(SubscriptionState::Failed));
        assert!(!cell.try_finish(SubscriptionState::Cancelled));
        assert_eq!(cell.get(), SubscriptionState::Completed);
    }

    #[test]
    fn terminal_states_are_never_left() {
        let cell = StateCell::new();
        cell.try_finish(SubscriptionState::Failed);

        assert!(!cell.try_finish(SubscriptionState::Completed));
        assert_eq!(cell.get(), SubscriptionState::Failed);
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let handle = pending_handle();

        handle.cancel();
        handle.cancel();

        assert_eq!(handle.state(), SubscriptionState::Cancelled);
        assert!(handle.is_terminated());
    }

    #[tokio::test]
    async fn cancel_after_completion_does_not_change_the_outcome() {
        let handle = pending_handle();
        assert!(handle.state.try_finish(SubscriptionState::Completed));

        handle.cancel();

        assert_eq!(handle.state(), SubscriptionState::Completed);
    }

    #[test]
    fn subscription_ids_are_unique() {
        assert_ne!(SubscriptionId::new(), SubscriptionId::new());
    }
}
