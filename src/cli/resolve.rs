use anyhow::{Result, anyhow, bail};
use log::info;
use tokio::sync::mpsc;

use crate::{
    config::Config,
    resolver::{Finder, Resolution},
    store::{AccountId, MailStore, MailboxKind},
    sync::CommandSyncTrigger,
};

/// Resolves one mailbox and prints its id. Exits nonzero unless the mailbox
/// was found.
pub async fn resolve(config: &Config, account: i64, kind: MailboxKind) -> Result<()> {
    let account = AccountId::try_from(account).map_err(|issue| anyhow!("{issue}"))?;
    let store = MailStore::open(config.statedir())?;
    let trigger = CommandSyncTrigger::new(config.sync_command().clone());
    let mut finder = Finder::new(store, trigger);

    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    finder.start(account, kind, outcome_tx);

    match outcome_rx.recv().await {
        Some(Resolution::MailboxFound(account, mailbox)) => {
            info!("resolved {kind} mailbox of account {account}");
            println!("{mailbox}");
            Ok(())
        }
        Some(Resolution::MailboxNotFound(account)) => {
            bail!("account {account} has no {kind} mailbox")
        }
        Some(Resolution::AccountSecurityHold(account)) => {
            bail!("account {account} is blocked by a security hold")
        }
        Some(Resolution::AccountNotFound) => bail!("no account with id {account}"),
        None => bail!("resolution was abandoned before completing"),
    }
}
