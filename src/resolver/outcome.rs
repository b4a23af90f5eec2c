use log::trace;
use tokio::sync::mpsc;

use crate::store::{AccountId, MailboxId};

/// The four mutually exclusive ways a resolution can settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No account with the requested id exists.
    AccountNotFound,
    /// The account exists but is blocked by a security hold.
    AccountSecurityHold(AccountId),
    /// The wanted mailbox exists, locally or after a refresh.
    MailboxFound(AccountId, MailboxId),
    /// The wanted mailbox does not exist even after a refresh, or the
    /// refresh itself failed.
    MailboxNotFound(AccountId),
}

/// Sink for the terminal notification of a resolution.
///
/// At most one method is invoked, at most once per started resolution, and
/// none after a cancel.
pub trait Callback: Send + 'static {
    fn on_account_not_found(&self);
    fn on_account_security_hold(&self, account: AccountId);
    fn on_mailbox_found(&self, account: AccountId, mailbox: MailboxId);
    fn on_mailbox_not_found(&self, account: AccountId);
}

pub(crate) fn dispatch(callback: &impl Callback, resolution: Resolution) {
    trace!("dispatching {resolution:?}");
    match resolution {
        Resolution::AccountNotFound => callback.on_account_not_found(),
        Resolution::AccountSecurityHold(account) => callback.on_account_security_hold(account),
        Resolution::MailboxFound(account, mailbox) => callback.on_mailbox_found(account, mailbox),
        Resolution::MailboxNotFound(account) => callback.on_mailbox_not_found(account),
    }
}

/// Receives the outcome as a channel message instead of a method call. A
/// dropped receiver turns the notification into a no-op.
impl Callback for mpsc::UnboundedSender<Resolution> {
    fn on_account_not_found(&self) {
        let _ = self.send(Resolution::AccountNotFound);
    }

    fn on_account_security_hold(&self, account: AccountId) {
        let _ = self.send(Resolution::AccountSecurityHold(account));
    }

    fn on_mailbox_found(&self, account: AccountId, mailbox: MailboxId) {
        let _ = self.send(Resolution::MailboxFound(account, mailbox));
    }

    fn on_mailbox_not_found(&self, account: AccountId) {
        let _ = self.send(Resolution::MailboxNotFound(account));
    }
}
