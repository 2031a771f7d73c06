//! Telegram delivery with retry and exponential backoff.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use guidewatch_shared::{GuidewatchError, Result};

/// Default Telegram Bot API endpoint.
const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Delay before the second attempt; doubles on every further attempt.
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Telegram Bot API client for the `sendMessage` call.
pub struct TelegramClient {
    http: Client,
    bot_token: String,
    chat_id: String,
    retries: u32,
    base_delay: Duration,
    api_base: String,
}

impl TelegramClient {
    /// Create a client with the given credentials and per-attempt timeout.
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
        retries: u32,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GuidewatchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            retries: retries.max(1),
            base_delay: DEFAULT_BASE_DELAY,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (for tests with a mock server).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the initial backoff delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Send a message to the configured chat.
    ///
    /// Any non-200 response, timeout, or connection error counts as a failed
    /// attempt. Exhausting all attempts yields a delivery error carrying the
    /// last observed failure.
    pub async fn send(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let mut delay = self.base_delay;
        let mut last_error = String::new();

        for attempt in 1..=self.retries {
            debug!(attempt, retries = self.retries, "sending Telegram message");

            let response = self
                .http
                .post(&url)
                .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
                .send()
                .await;

            match response {
                Ok(resp) if resp.status() == StatusCode::OK => {
                    debug!(attempt, "Telegram send succeeded");
                    return Ok(());
                }
                Ok(resp) => {
                    last_error = format!("HTTP {}", resp.status());
                }
                Err(e) => {
                    last_error = e.to_string();
                }
            }

            warn!(attempt, error = %last_error, "Telegram send attempt failed");

            if attempt < self.retries {
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }

        Err(GuidewatchError::Delivery(format!(
            "giving up after {} attempt(s): {last_error}",
            self.retries
        )))
    }
}
