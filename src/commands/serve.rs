use crate::libs::config::Config;
use crate::server;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Socket address to listen on, e.g. 127.0.0.1:3001
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite database file, or `:memory:`
    #[arg(long)]
    database: Option<String>,

    /// Do not insert sample tasks into a new database
    #[arg(long)]
    no_seed: bool,
}

pub async fn cmd(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(database) = args.database {
        config.server.database = Some(database);
    }
    if args.no_seed {
        config.server.seed = false;
    }

    server::serve(&config.server).await
}
