mod cache;
mod cli;
mod config;
mod core;
mod corpus;
mod error;
mod search;

use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::Cli::run().await
}
