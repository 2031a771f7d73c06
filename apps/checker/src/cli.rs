//! Checker CLI definition, tracing setup, and the run driver.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use guidewatch_scanner::engine::{CheckConfig, CheckOutcome, run_check};
use guidewatch_shared::load_config;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Check admissions pages for new guideline postings.
#[derive(Parser)]
#[command(
    name = "guidewatch-check",
    version,
    about = "Check admissions pages for newly published guideline documents.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Page URL to scan (repeatable). Defaults to the official admission pages.
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// State JSON path for baseline and change detection.
    #[arg(long, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Target academic year to detect (e.g., 2027). Default: current year + 1.
    #[arg(long, value_name = "YEAR")]
    pub target_year: Option<i32>,

    /// HTTP timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// If no baseline exists yet, treat current findings as detected.
    #[arg(long)]
    pub alert_on_first_run: bool,

    /// Print a machine-readable JSON summary instead of human text.
    #[arg(long)]
    pub print_json: bool,

    /// Also write the JSON summary to a file (the notifier handoff).
    #[arg(long, value_name = "PATH")]
    pub summary_out: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "guidewatch=info",
        1 => "guidewatch=debug",
        _ => "guidewatch=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run one check and map the outcome to the process exit code.
pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config()?;

    let urls = if cli.urls.is_empty() {
        config.watch.urls.clone()
    } else {
        cli.urls.clone()
    };
    let state_path = cli
        .state
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.watch.state_path));
    let timeout_secs = cli.timeout.unwrap_or(config.watch.timeout_secs);
    if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
        return Err(eyre!("invalid --timeout: {timeout_secs}"));
    }

    let check_config = CheckConfig {
        urls,
        state_path,
        target_year: cli.target_year,
        timeout: Duration::from_secs_f64(timeout_secs),
        alert_on_first_run: cli.alert_on_first_run || config.watch.alert_on_first_run,
    };

    let now = Local::now();
    let outcome = run_check(&check_config, now).await?;

    if let Some(path) = &cli.summary_out {
        write_summary(path, &outcome)?;
        info!(path = %path.display(), "summary written");
    }

    if cli.print_json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    } else {
        print_human(&outcome, &check_config);
    }

    Ok(ExitCode::from(outcome.exit_code()))
}

/// Write the JSON summary for the notifier, creating parent directories.
fn write_summary(path: &Path, outcome: &CheckOutcome) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(&outcome.summary)?)?;
    Ok(())
}

/// Human-readable run report.
fn print_human(outcome: &CheckOutcome, config: &CheckConfig) {
    let summary = &outcome.summary;

    if !summary.fetch_errors.is_empty() {
        println!("WARN: Some pages could not be fetched:");
        for err in &summary.fetch_errors {
            println!("- {err}");
        }
    }

    if summary.detected {
        println!(
            "DETECTED: possible new guidelines found (target year: {}).",
            summary.target_year
        );
    } else {
        println!(
            "NO_UPDATE: no new target-year posting found (target year: {}).",
            summary.target_year
        );
    }

    println!(
        "Scanned {} page(s), found {} candidate item(s).",
        outcome.urls_scanned, outcome.candidate_count
    );

    if summary.first_run {
        println!("Initialized state at: {}", config.state_path.display());
    }
}
