use super::{connect, report};
use crate::client::{Filters, SortMode};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::task::{Priority, StatusFilter};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show only active or only completed tasks
    #[arg(short, long, value_parser = ["all", "active", "completed"], default_value = "all")]
    status: String,

    /// Show only tasks with this priority
    #[arg(short, long)]
    priority: Option<Priority>,

    /// Case-insensitive text to find in title or description
    #[arg(short = 'q', long)]
    search: Option<String>,

    /// Sort order after completion: due, priority or created
    #[arg(long, default_value = "due")]
    sort: SortMode,
}

pub async fn cmd(args: ListArgs, config: &Config) -> Result<()> {
    let mut board = connect(config)?;

    if !board.load().await {
        report(board.state());
        return Ok(());
    }

    board.set_filters(Filters {
        status: StatusFilter::parse(&args.status),
        priority: args.priority,
        search: args.search.unwrap_or_default(),
    });

    let tasks = board.visible_tasks(args.sort);
    if tasks.is_empty() {
        msg_info!(board.state().empty_message());
        return Ok(());
    }

    msg_print!(Message::TasksHeader(tasks.len(), board.state().tasks.len()), true);
    View::tasks(&tasks)?;

    Ok(())
}
