use std::{fs::create_dir_all, io, path::Path, sync::Arc};

use enumflags2::BitFlag;
use log::{debug, trace};
use rusqlite::{Connection, OptionalExtension, Row};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::store::{Account, AccountFlag, AccountId, Mailbox, MailboxId, MailboxKind};

#[derive(Debug, Error)]
pub enum StoreOpenError {
    #[error("could not prepare state directory: {0}")]
    Io(#[from] io::Error),
    #[error("could not open mail store: {0}")]
    Db(#[from] rusqlite::Error),
}

const SCHEMA: &str = "pragma journal_mode=wal;
    pragma synchronous=1;
    create table if not exists account (
        id integer primary key,
        name text not null,
        flags integer not null
    ) strict;
    create table if not exists mailbox (
        id integer primary key,
        account_id integer not null references account (id),
        kind integer not null,
        name text not null,
        unique (account_id, kind)
    ) strict;
    pragma optimize;";

/// Account and mailbox lookups, backed by sqlite.
///
/// Resolution only reads from it. The mailbox list itself is maintained by
/// the sync side, which shares the database file; `add_account` and
/// `add_mailbox` are that write path.
#[derive(Clone, Debug)]
pub struct MailStore {
    db: Arc<Mutex<Connection>>,
}

impl MailStore {
    pub fn open(state_dir: &Path) -> Result<Self, StoreOpenError> {
        create_dir_all(state_dir)?;
        let store_file = state_dir.join("mailboxfind.db");
        debug!("opening mail store {}", store_file.to_string_lossy());
        let db = Connection::open(store_file)?;
        db.execute_batch(SCHEMA)?;

        Ok(Self::wrap(db))
    }

    pub fn in_memory() -> Self {
        let db = Connection::open_in_memory().expect("in memory store should be creatable");
        db.execute_batch(SCHEMA)
            .expect("creation of tables should succeed");

        Self::wrap(db)
    }

    fn wrap(db: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    pub async fn account(&self, id: AccountId) -> Option<Account> {
        trace!("looking up account {id}");
        let db = self.db.lock().await;
        let mut stmt = db
            .prepare_cached("select id, name, flags from account where id = ?1")
            .expect("account lookup should be preparable");

        stmt.query_one([i64::from(id)], |row| row.try_into())
            .optional()
            .expect("account should be queryable")
    }

    pub async fn mailbox(&self, account: AccountId, kind: MailboxKind) -> Option<Mailbox> {
        trace!("looking up {kind} mailbox of account {account}");
        let db = self.db.lock().await;
        let mut stmt = db
            .prepare_cached(
                "select id, account_id, kind, name from mailbox
                where account_id = ?1 and kind = ?2",
            )
            .expect("mailbox lookup should be preparable");

        stmt.query_one((i64::from(account), i64::from(kind)), |row| row.try_into())
            .optional()
            .expect("mailbox should be queryable")
    }

    pub async fn add_account(&self, account: &Account) {
        trace!("storing account {account:?}");
        let db = self.db.lock().await;
        let mut stmt = db
            .prepare_cached("insert into account (id, name, flags) values (?1, ?2, ?3)")
            .expect("account insert should be preparable");
        stmt.execute((
            i64::from(account.id()),
            account.name(),
            account.flags().bits(),
        ))
        .expect("account should be insertable");
    }

    pub async fn add_mailbox(
        &self,
        account: AccountId,
        kind: MailboxKind,
        name: &str,
    ) -> MailboxId {
        trace!("storing {kind} mailbox for account {account}");
        let db = self.db.lock().await;
        let mut stmt = db
            .prepare_cached("insert into mailbox (account_id, kind, name) values (?1, ?2, ?3)")
            .expect("mailbox insert should be preparable");
        stmt.execute((i64::from(account), i64::from(kind), name))
            .expect("mailbox should be insertable");

        db.last_insert_rowid()
            .try_into()
            .expect("fresh mailbox rowid should be a valid id")
    }
}

impl TryFrom<&Row<'_>> for Account {
    type Error = rusqlite::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let id: i64 = row.get(0)?;
        let id = id.try_into().expect("stored account id should be nonzero");
        let flags = AccountFlag::from_bits_truncate(row.get(2)?);
        Ok(Self::new(id, row.get(1)?, flags))
    }
}

impl TryFrom<&Row<'_>> for Mailbox {
    type Error = rusqlite::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let id: i64 = row.get(0)?;
        let id = id.try_into().expect("stored mailbox id should be nonzero");
        let account: i64 = row.get(1)?;
        let account = account
            .try_into()
            .expect("stored account id should be nonzero");
        let kind: i64 = row.get(2)?;
        let kind = kind.try_into().expect("stored mailbox kind should be known");
        Ok(Self::new(id, account, kind, row.get(3)?))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use assertables::*;
    use enumflags2::BitFlags;
    use rstest::*;
    use tempfile::tempdir;

    use super::*;

    #[fixture]
    fn store() -> MailStore {
        MailStore::in_memory()
    }

    #[fixture]
    fn account_id() -> AccountId {
        assert_ok!(AccountId::try_from(7))
    }

    #[fixture]
    fn account(account_id: AccountId) -> Account {
        Account::new(account_id, "work".to_string(), BitFlags::empty())
    }

    #[rstest]
    fn test_open_creates_store_file() {
        let dir = assert_ok!(tempdir());
        assert_ok!(MailStore::open(dir.path()));
        assert!(assert_ok!(fs::exists(dir.path().join("mailboxfind.db"))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_account_round_trips(store: MailStore, account: Account) {
        store.add_account(&account).await;
        let found = assert_some!(store.account(account.id()).await);
        assert_eq!(account, found);
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_account_is_none(store: MailStore, account_id: AccountId) {
        assert_none!(store.account(account_id).await);
    }

    #[rstest]
    #[tokio::test]
    async fn test_security_hold_survives_the_store(store: MailStore, account_id: AccountId) {
        let held = Account::new(
            account_id,
            "held".to_string(),
            AccountFlag::SecurityHold.into(),
        );
        store.add_account(&held).await;
        let found = assert_some!(store.account(account_id).await);
        assert!(found.security_hold());
    }

    #[rstest]
    #[tokio::test]
    async fn test_mailbox_lookup_matches_kind_exactly(store: MailStore, account: Account) {
        store.add_account(&account).await;
        let id = store
            .add_mailbox(account.id(), MailboxKind::Drafts, "Drafts")
            .await;

        assert_none!(store.mailbox(account.id(), MailboxKind::Inbox).await);
        let found = assert_some!(store.mailbox(account.id(), MailboxKind::Drafts).await);
        assert_eq!(id, found.id());
        assert_eq!(account.id(), found.account());
        assert_eq!(MailboxKind::Drafts, found.kind());
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_mailbox_returns_fresh_ids(store: MailStore, account: Account) {
        store.add_account(&account).await;
        let inbox = store
            .add_mailbox(account.id(), MailboxKind::Inbox, "Inbox")
            .await;
        let sent = store
            .add_mailbox(account.id(), MailboxKind::Sent, "Sent")
            .await;
        assert_ne!(inbox, sent);
    }
}
