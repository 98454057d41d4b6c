//! Command-line front end.
//!
//! `serve` runs the task API. Every other command is a client of that API:
//! it loads the task list, performs one operation and prints the outcome.

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod init;
pub mod list;
pub mod serve;

use crate::api::TaskApi;
use crate::client::{ClientState, Severity, TaskBoard};
use crate::libs::config::Config;
use crate::libs::messages::macros::is_debug_mode;
use crate::libs::messages::Message;
use crate::libs::task::parse_due_date;
use crate::{msg_error, msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the task API server")]
    Serve(serve::ServeArgs),
    #[command(about = "List tasks")]
    List(list::ListArgs),
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "Edit a task")]
    Edit(edit::EditArgs),
    #[command(about = "Toggle task completion")]
    Done(done::DoneArgs),
    #[command(about = "Delete a task")]
    Delete(delete::DeleteArgs),
    #[command(about = "Configuration initialization")]
    Init,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Task API base URL, overriding the configuration
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();

        if matches!(cli.command, Commands::Serve(_)) || is_debug_mode() {
            init_tracing();
        }

        let mut config = Config::read()?.with_env_overrides();
        if let Some(api_url) = cli.api_url {
            config.client.api_url = api_url;
        }

        match cli.command {
            Commands::Serve(args) => serve::cmd(args, config).await,
            Commands::List(args) => list::cmd(args, &config).await,
            Commands::Add(args) => add::cmd(args, &config).await,
            Commands::Edit(args) => edit::cmd(args, &config).await,
            Commands::Done(args) => done::cmd(args, &config).await,
            Commands::Delete(args) => delete::cmd(args, &config).await,
            Commands::Init => init::cmd(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::registry().with(filter).with(fmt::layer()).try_init() {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}

/// Board connected to the configured API.
pub(crate) fn connect(config: &Config) -> Result<TaskBoard<TaskApi>> {
    Ok(TaskBoard::new(TaskApi::new(&config.client.api_url)?))
}

/// Prints the pending notification, if any.
pub(crate) fn report(state: &ClientState) {
    if let Some(notification) = &state.notification {
        match notification.severity {
            Severity::Success => msg_success!(notification.message),
            Severity::Info => msg_info!(notification.message),
            Severity::Warning => msg_warning!(notification.message),
            Severity::Error => msg_error!(notification.message),
        }
    }
}

/// clap value parser for `YYYY-MM-DD` arguments.
pub(crate) fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_due_date(value).ok_or_else(|| Message::InvalidDueDateInput(value.to_string()).to_string())
}
