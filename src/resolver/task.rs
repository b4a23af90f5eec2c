use std::sync::Arc;

use log::{debug, trace, warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    resolver::outcome::{Callback, Resolution, dispatch},
    store::{AccountId, MailStore, MailboxKind},
    sync::{SyncEvent, SyncListener, SyncOutcome, SyncTrigger},
};

/// Immutable description of one resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolveRequest {
    account: AccountId,
    kind: MailboxKind,
}

impl ResolveRequest {
    pub(crate) fn new(account: AccountId, kind: MailboxKind) -> Self {
        Self { account, kind }
    }
}

/// One in-flight resolution.
///
/// Runs the lookup chain account, mailbox, refresh, mailbox again and
/// settles in exactly one [`Resolution`], or in silence when cancelled. The
/// single suspension point is the wait for the sync trigger's completion
/// event; cancellation is observed there, at task entry, and once more right
/// before the callback fires.
pub(crate) struct ResolveTask<T> {
    request: ResolveRequest,
    store: MailStore,
    trigger: Arc<T>,
    listener: SyncListener,
    events: mpsc::UnboundedReceiver<SyncEvent>,
    cancellation: CancellationToken,
}

impl<T: SyncTrigger> ResolveTask<T> {
    pub(crate) fn new(
        request: ResolveRequest,
        store: MailStore,
        trigger: Arc<T>,
        listener: SyncListener,
        events: mpsc::UnboundedReceiver<SyncEvent>,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            request,
            store,
            trigger,
            listener,
            events,
            cancellation,
        }
    }

    pub(crate) async fn run(mut self, callback: impl Callback) {
        let Some(resolution) = self.resolve().await else {
            trace!("resolution of {:?} ended without outcome", self.request);
            return;
        };
        // a cancel racing with a settled outcome still wins
        if self.cancellation.is_cancelled() {
            trace!("suppressing {resolution:?} after cancel");
            return;
        }
        dispatch(&callback, resolution);
    }

    async fn resolve(&mut self) -> Option<Resolution> {
        if self.cancellation.is_cancelled() {
            return None;
        }
        let account = self.request.account;
        let kind = self.request.kind;

        let Some(record) = self.store.account(account).await else {
            return Some(Resolution::AccountNotFound);
        };
        if record.security_hold() {
            debug!("account {account} is on security hold");
            return Some(Resolution::AccountSecurityHold(account));
        }

        if let Some(mailbox) = self.store.mailbox(account, kind).await {
            return Some(Resolution::MailboxFound(account, mailbox.id()));
        }

        debug!("no local {kind} mailbox for account {account}, requesting refresh");
        self.trigger
            .refresh_mailbox_list(account, self.listener.clone());

        match self.await_refresh().await? {
            SyncOutcome::Error(issue) => {
                warn!("refresh for account {account} failed: {issue}");
                Some(Resolution::MailboxNotFound(account))
            }
            SyncOutcome::Success { .. } => match self.store.mailbox(account, kind).await {
                Some(mailbox) => Some(Resolution::MailboxFound(account, mailbox.id())),
                None => Some(Resolution::MailboxNotFound(account)),
            },
        }
    }

    /// Suspends until the sync trigger reports completion for the requested
    /// account. Events for other accounts are dropped. Returns `None` once
    /// cancelled.
    async fn await_refresh(&mut self) -> Option<SyncOutcome> {
        loop {
            tokio::select! {
                () = self.cancellation.cancelled() => return None,
                event = self.events.recv() => {
                    let event = event?;
                    if event.account() == self.request.account {
                        return Some(event.into_outcome());
                    }
                    trace!(
                        "ignoring refresh completion for unrelated account {}",
                        event.account()
                    );
                }
            }
        }
    }
}
