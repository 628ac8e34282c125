//! ai-service binary entry point

use clap::Parser;
use leservice::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Cli::parse().run().await
}
