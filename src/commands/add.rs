use super::{connect, parse_date_arg, report};
use crate::libs::config::Config;
use crate::libs::task::Priority;
use crate::libs::view::View;
use crate::msg_error;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    #[arg(required = true)]
    title: String,

    #[arg(short, long)]
    description: Option<String>,

    /// Due date as YYYY-MM-DD
    #[arg(long, value_parser = parse_date_arg)]
    due: Option<NaiveDate>,

    #[arg(short, long, default_value = "medium")]
    priority: Priority,
}

pub async fn cmd(args: AddArgs, config: &Config) -> Result<()> {
    let mut board = connect(config)?;

    let mut form = board.open_create();
    form.title = args.title;
    form.description = args.description.unwrap_or_default();
    form.due_date = args.due;
    form.priority = args.priority;

    let created = board.submit(&mut form).await;
    if let Some(error) = &form.error {
        msg_error!(error);
        return Ok(());
    }

    report(board.state());
    if created {
        if let Some(task) = board.state().tasks.last() {
            View::tasks(std::slice::from_ref(task))?;
        }
    }

    Ok(())
}
