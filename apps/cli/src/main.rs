//! JobScout CLI — remote-job digest tool.
//!
//! Scrapes remote job boards, scores each posting against your resume with a
//! local model, and prints a ranked digest of the best matches.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
