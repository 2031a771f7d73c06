//! guidewatch checker — scans admissions pages for new guideline postings.
//!
//! Fetches the configured pages, extracts anchor candidates, diffs them
//! against the persisted baseline, rewrites the baseline, and reports the
//! outcome via exit code and a JSON summary.

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
