mod account;
mod mail_store;
mod mailbox;

pub use account::Account;
pub use account::AccountFlag;
pub use account::AccountId;
pub use mail_store::MailStore;
pub use mail_store::StoreOpenError;
pub use mailbox::Mailbox;
pub use mailbox::MailboxId;
pub use mailbox::MailboxKind;
