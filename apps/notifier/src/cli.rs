//! Notifier CLI definition, tracing setup, and the delivery driver.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::Result;
use guidewatch_shared::{Summary, env_flag, load_config, required_env};
use guidewatch_telegram::{TelegramClient, append_heartbeat, build_message};
use tracing::info;

/// Environment flag enabling the unconditional heartbeat message.
const HEARTBEAT_ENV: &str = "HEARTBEAT_NOTIFY";

/// Bot credential environment variables.
const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Post a checker summary to Telegram.
#[derive(Parser)]
#[command(
    name = "guidewatch-notify",
    version,
    about = "Send a Telegram notification for a guidewatch checker summary.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to the checker JSON summary.
    #[arg(long, value_name = "PATH")]
    pub summary_file: PathBuf,

    /// HTTP timeout per delivery attempt, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Delivery attempts before giving up.
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

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

/// Read the summary, decide whether to notify, and deliver.
///
/// Missing credentials and exhausted retries are reported as diagnostics
/// with exit code 1; neither crashes the process.
pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config()?;

    let content = std::fs::read_to_string(&cli.summary_file)?;
    let summary: Summary = serde_json::from_str(&content)?;

    let heartbeat = env_flag(HEARTBEAT_ENV, true);
    let quiet = !summary.detected && summary.fetch_errors.is_empty();
    let should_notify = summary.detected || !summary.fetch_errors.is_empty() || heartbeat;

    if !should_notify {
        println!("No notification needed.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut message = build_message(&summary);
    if heartbeat && quiet {
        message = append_heartbeat(&message, Utc::now());
    }

    let (bot_token, chat_id) = match (required_env(BOT_TOKEN_ENV), required_env(CHAT_ID_ENV)) {
        (Ok(token), Ok(chat)) => (token, chat),
        _ => {
            eprintln!("Telegram not configured. Set {BOT_TOKEN_ENV} and {CHAT_ID_ENV}.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.telegram.timeout_secs));
    let retries = cli.retries.unwrap_or(config.telegram.retries);

    let client = TelegramClient::new(bot_token, chat_id, timeout, retries)?;
    match client.send(&message).await {
        Ok(()) => {
            info!(retries, "notification delivered");
            println!("Sent Telegram notification.");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Failed to send Telegram notification: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
