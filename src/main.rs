use anyhow::Result;
use ats_client::cli::{run, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}
