use super::{connect, parse_date_arg, report};
use crate::client::TaskForm;
use crate::libs::config::Config;
use crate::libs::formatter::priority_label;
use crate::libs::messages::Message;
use crate::libs::task::{parse_due_date, Priority, DUE_DATE_FORMAT};
use crate::libs::view::View;
use crate::{msg_error, msg_print};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id of the task to edit
    id: i64,

    #[arg(short, long)]
    title: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    /// New due date as YYYY-MM-DD
    #[arg(long, value_parser = parse_date_arg, conflicts_with = "clear_due")]
    due: Option<NaiveDate>,

    /// Remove the due date
    #[arg(long)]
    clear_due: bool,

    #[arg(short, long)]
    priority: Option<Priority>,
}

impl EditArgs {
    fn has_changes(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.due.is_some() || self.clear_due || self.priority.is_some()
    }
}

pub async fn cmd(args: EditArgs, config: &Config) -> Result<()> {
    let mut board = connect(config)?;

    if !board.load().await {
        report(board.state());
        return Ok(());
    }

    let Some(task) = board.find(args.id).cloned() else {
        msg_error!(Message::TaskNotFoundWithId(args.id));
        return Ok(());
    };

    let mut form = board.open_edit(&task);

    if args.has_changes() {
        apply_args(&mut form, args);
    } else {
        msg_print!(Message::EditingTask(task.title.clone()), true);
        prompt(&mut form)?;
    }

    let updated = board.submit(&mut form).await;
    if let Some(error) = &form.error {
        msg_error!(error);
        return Ok(());
    }

    report(board.state());
    if updated {
        if let Some(task) = board.find(task.id) {
            View::tasks(std::slice::from_ref(task))?;
        }
    }

    Ok(())
}

fn apply_args(form: &mut TaskForm, args: EditArgs) {
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if args.clear_due {
        form.due_date = None;
    } else if let Some(due) = args.due {
        form.due_date = Some(due);
    }
    if let Some(priority) = args.priority {
        form.priority = priority;
    }
}

/// Interactive edit with the current values as defaults.
fn prompt(form: &mut TaskForm) -> Result<()> {
    form.title = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(form.title.clone())
        .interact_text()?;

    form.description = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(form.description.clone())
        .allow_empty(true)
        .interact_text()?;

    let current_due = form.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string()).unwrap_or_default();
    let due: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .default(current_due)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() || parse_due_date(input).is_some() {
                Ok(())
            } else {
                Err(Message::InvalidDueDateInput(input.clone()).to_string())
            }
        })
        .interact_text()?;
    form.due_date = parse_due_date(&due);

    let labels: Vec<&str> = Priority::ALL.iter().map(|p| priority_label(*p)).collect();
    let current = Priority::ALL.iter().position(|p| *p == form.priority).unwrap_or(1);
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskPriority.to_string())
        .items(&labels)
        .default(current)
        .interact()?;
    form.priority = Priority::ALL[selection];

    Ok(())
}
