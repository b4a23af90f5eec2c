use log::trace;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::store::{AccountId, MailboxId};

/// Failure reported by the sync side for one refresh attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mailbox list refresh failed: {detail}")]
pub struct SyncError {
    detail: String,
}

impl SyncError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Terminal result of one mailbox list refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The refresh ran to completion. The mailbox list may or may not have
    /// changed; `matched` carries a mailbox id the sync side already matched,
    /// if it happened to. The store stays authoritative either way.
    Success { matched: Option<MailboxId> },
    Error(SyncError),
}

/// Completion event delivered to a registered listener, tagged with the
/// account the refresh was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEvent {
    account: AccountId,
    outcome: SyncOutcome,
}

impl SyncEvent {
    pub fn success(account: AccountId, matched: Option<MailboxId>) -> Self {
        Self {
            account,
            outcome: SyncOutcome::Success { matched },
        }
    }

    pub fn error(account: AccountId, error: SyncError) -> Self {
        Self {
            account,
            outcome: SyncOutcome::Error(error),
        }
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn into_outcome(self) -> SyncOutcome {
        self.outcome
    }
}

/// Write end of the completion channel a resolution registers with the sync
/// trigger. Cloneable so the trigger and a test harness can both hold one.
#[derive(Clone, Debug)]
pub struct SyncListener {
    events: mpsc::UnboundedSender<SyncEvent>,
}

impl SyncListener {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        (Self { events }, events_rx)
    }

    /// Delivers one completion event. Events arriving after the resolution
    /// finished or was dropped are discarded.
    pub fn notify(&self, event: SyncEvent) {
        if self.events.send(event).is_err() {
            trace!("discarding sync completion event, resolution is gone");
        }
    }
}

/// Starts an asynchronous refresh of an account's mailbox list.
///
/// `refresh_mailbox_list` returns immediately; the listener is notified
/// exactly once per invocation when the refresh settles.
pub trait SyncTrigger: Send + Sync + 'static {
    fn refresh_mailbox_list(&self, account: AccountId, listener: SyncListener);
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn account_id() -> AccountId {
        assert_ok!(AccountId::try_from(5))
    }

    #[rstest]
    fn test_notify_delivers_event_to_receiver(account_id: AccountId) {
        let (listener, mut events) = SyncListener::channel();
        listener.notify(SyncEvent::success(account_id, None));

        let event = assert_ok!(events.try_recv());
        assert_eq!(account_id, event.account());
        assert_eq!(SyncOutcome::Success { matched: None }, event.into_outcome());
    }

    #[rstest]
    fn test_notify_without_receiver_is_a_no_op(account_id: AccountId) {
        let (listener, events) = SyncListener::channel();
        drop(events);

        listener.notify(SyncEvent::error(account_id, SyncError::new("gone")));
    }

    #[rstest]
    fn test_error_event_carries_detail(account_id: AccountId) {
        let event = SyncEvent::error(account_id, SyncError::new("connection reset"));
        assert_eq!(account_id, event.account());
        let SyncOutcome::Error(error) = event.into_outcome() else {
            panic!("outcome should be an error");
        };
        assert_eq!("mailbox list refresh failed: connection reset", error.to_string());
    }
}
