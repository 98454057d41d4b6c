use super::{connect, report};
use crate::libs::config::Config;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Id of the task to complete or reopen
    id: i64,
}

pub async fn cmd(args: DoneArgs, config: &Config) -> Result<()> {
    let mut board = connect(config)?;

    board.toggle(args.id).await;
    report(board.state());

    Ok(())
}
