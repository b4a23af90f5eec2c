use std::{fmt::Display, num::NonZeroI64};

use enumflags2::{BitFlags, bitflags};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(transparent)]
pub struct AccountId(NonZeroI64);

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for AccountId {
    type Error = &'static str;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(Self(
            NonZeroI64::new(value).ok_or("account id should not be zero")?,
        ))
    }
}

impl TryFrom<&i64> for AccountId {
    type Error = <Self as TryFrom<i64>>::Error;

    fn try_from(value: &i64) -> Result<Self, Self::Error> {
        Self::try_from(*value)
    }
}

impl From<AccountId> for i64 {
    fn from(value: AccountId) -> Self {
        value.0.into()
    }
}

/// Account level conditions that gate mailbox operations.
#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AccountFlag {
    /// Set while the user has to re-verify credentials. Blocks resolution.
    SecurityHold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    name: String,
    flags: BitFlags<AccountFlag>,
}

impl Account {
    pub fn new(id: AccountId, name: String, flags: BitFlags<AccountFlag>) -> Self {
        Self { id, name, flags }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> BitFlags<AccountFlag> {
        self.flags
    }

    pub fn security_hold(&self) -> bool {
        self.flags.contains(AccountFlag::SecurityHold)
    }
}
