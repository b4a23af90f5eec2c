use std::{fmt::Display, num::NonZeroI64};

use clap::ValueEnum;

use crate::store::AccountId;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(transparent)]
pub struct MailboxId(NonZeroI64);

impl Display for MailboxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for MailboxId {
    type Error = &'static str;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(Self(
            NonZeroI64::new(value).ok_or("mailbox id should not be zero")?,
        ))
    }
}

impl From<MailboxId> for i64 {
    fn from(value: MailboxId) -> Self {
        value.0.into()
    }
}

/// Role of a mailbox within one account. Together with the account id this
/// is an exact match key: an account holds at most one mailbox per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum MailboxKind {
    Inbox,
    Drafts,
    Sent,
    Trash,
    Junk,
}

impl From<MailboxKind> for i64 {
    fn from(value: MailboxKind) -> Self {
        match value {
            MailboxKind::Inbox => 0,
            MailboxKind::Drafts => 1,
            MailboxKind::Sent => 2,
            MailboxKind::Trash => 3,
            MailboxKind::Junk => 4,
        }
    }
}

impl TryFrom<i64> for MailboxKind {
    type Error = &'static str;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inbox),
            1 => Ok(Self::Drafts),
            2 => Ok(Self::Sent),
            3 => Ok(Self::Trash),
            4 => Ok(Self::Junk),
            _ => Err("unknown mailbox kind"),
        }
    }
}

impl Display for MailboxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Inbox => "inbox",
            Self::Drafts => "drafts",
            Self::Sent => "sent",
            Self::Trash => "trash",
            Self::Junk => "junk",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mailbox {
    id: MailboxId,
    account: AccountId,
    kind: MailboxKind,
    name: String,
}

impl Mailbox {
    pub fn new(id: MailboxId, account: AccountId, kind: MailboxKind, name: String) -> Self {
        Self {
            id,
            account,
            kind,
            name,
        }
    }

    pub fn id(&self) -> MailboxId {
        self.id
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn kind(&self) -> MailboxKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
