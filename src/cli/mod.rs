mod resolve;

use anyhow::Result;

use crate::{Args, config::Config};

pub async fn run(args: &Args, config: &Config) -> Result<()> {
    resolve::resolve(config, args.account, args.kind).await
}
