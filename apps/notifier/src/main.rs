//! guidewatch notifier — posts a checker summary to Telegram.
//!
//! Reads the checker's JSON summary, composes the notification body
//! (optionally with a heartbeat line), and delivers it with retry/backoff.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    cli::init_tracing(&cli);
    cli::run(cli).await
}
