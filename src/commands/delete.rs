use super::{connect, report};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the task to delete
    id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: DeleteArgs, config: &Config) -> Result<()> {
    let mut board = connect(config)?;

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptConfirmDelete.to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::DeleteCancelled);
        return Ok(());
    }

    board.delete(args.id).await;
    report(board.state());

    Ok(())
}
