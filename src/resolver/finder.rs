use std::sync::Arc;

use log::warn;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    resolver::{
        outcome::Callback,
        task::{ResolveRequest, ResolveTask},
    },
    store::{AccountId, MailStore, MailboxKind},
    sync::{SyncListener, SyncTrigger},
};

/// Public entry point of the resolver.
///
/// Owns at most one in-flight resolution. Starting a new one invalidates the
/// previous one instead of relying on callers to cancel first.
pub struct Finder<T> {
    store: MailStore,
    trigger: Arc<T>,
    active: Option<Active>,
}

struct Active {
    cancellation: CancellationToken,
    listener: SyncListener,
    task: JoinHandle<()>,
}

impl Active {
    fn cancel(&self) {
        self.cancellation.cancel();
    }
}

impl<T: SyncTrigger> Finder<T> {
    pub fn new(store: MailStore, trigger: T) -> Self {
        Self {
            store,
            trigger: Arc::new(trigger),
            active: None,
        }
    }

    /// Begins resolving `(account, kind)` and returns immediately. The
    /// callback receives exactly one terminal notification unless the
    /// resolution is cancelled first.
    pub fn start(&mut self, account: AccountId, kind: MailboxKind, callback: impl Callback) {
        if let Some(previous) = self.active.take() {
            if !previous.task.is_finished() {
                warn!("replacing an unfinished resolution, cancelling it");
            }
            previous.cancel();
        }

        let (listener, events) = SyncListener::channel();
        let cancellation = CancellationToken::new();
        let task = ResolveTask::new(
            ResolveRequest::new(account, kind),
            self.store.clone(),
            Arc::clone(&self.trigger),
            listener.clone(),
            events,
            cancellation.clone(),
        );
        self.active = Some(Active {
            cancellation,
            listener,
            task: tokio::spawn(task.run(callback)),
        });
    }

    /// Cancels the in-flight resolution, if any. No callback fires after
    /// this returns, even when an already requested refresh completes later.
    /// Idempotent.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel();
        }
    }

    /// The listener registered for the active resolution. Lets a harness
    /// deliver sync completion events without a real sync trigger.
    pub fn registered_listener(&self) -> Option<&SyncListener> {
        self.active.as_ref().map(|active| &active.listener)
    }
}
