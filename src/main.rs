mod cli;
mod config;
mod logging;
mod resolver;
mod store;
mod sync;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use config::Config;
use store::MailboxKind;

#[derive(Parser)]
#[command(version, about = "resolve the mailbox id for an account and mailbox kind")]
pub struct Args {
    /// Numeric id of the account to resolve against
    #[arg(long)]
    account: i64,
    /// Role of the wanted mailbox
    #[arg(long, value_enum)]
    kind: MailboxKind,
    /// Alternative config file location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let args = Args::parse();
    let config = Config::load_from_file(args.config.clone());

    cli::run(&args, &config).await
}
