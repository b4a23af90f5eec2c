use std::process::Stdio;

use log::{debug, warn};
use tokio::process::Command;

use crate::{
    store::AccountId,
    sync::{SyncError, SyncEvent, SyncListener, SyncTrigger},
};

/// Refreshes mailbox lists by handing off to an external sync program.
///
/// The account id is appended to the configured argv; success and failure
/// are read from the exit status. The program is expected to repopulate the
/// mailbox table of the shared store before exiting.
pub struct CommandSyncTrigger {
    argv: Vec<String>,
}

impl CommandSyncTrigger {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl SyncTrigger for CommandSyncTrigger {
    fn refresh_mailbox_list(&self, account: AccountId, listener: SyncListener) {
        let Some((program, args)) = self.argv.split_first() else {
            warn!("no sync command configured, reporting refresh failure");
            listener.notify(SyncEvent::error(
                account,
                SyncError::new("no sync command configured"),
            ));
            return;
        };

        debug!("spawning {program} to refresh mailbox list of account {account}");
        let mut command = Command::new(program);
        command
            .args(args)
            .arg(account.to_string())
            .stdin(Stdio::null());

        tokio::spawn(async move {
            let event = match command.status().await {
                Ok(status) if status.success() => SyncEvent::success(account, None),
                Ok(status) => SyncEvent::error(
                    account,
                    SyncError::new(format!("sync command exited with {status}")),
                ),
                Err(issue) => SyncEvent::error(
                    account,
                    SyncError::new(format!("sync command could not run: {issue}")),
                ),
            };
            listener.notify(event);
        });
    }
}
