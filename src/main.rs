use anyhow::Result;
use dotenv::dotenv;
use tudu::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    Cli::menu().await
}
