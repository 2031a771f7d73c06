//! Sequential page fetching.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use guidewatch_shared::{GuidewatchError, Result};

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("guidewatch/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for one checker run.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(timeout)
        .build()
        .map_err(|e| GuidewatchError::Network(format!("failed to build HTTP client: {e}")))
}

/// Fetch a single page and return its body text.
///
/// Any non-success status is an error. Callers record failures and move on
/// to the next URL; nothing here aborts the run.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| GuidewatchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GuidewatchError::Network(format!("HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| GuidewatchError::Network(format!("body read failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_body_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admission/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let body = fetch_html(&client, &format!("{}/admission/", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let err = fetch_html(&client, &server.uri()).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn connection_error_is_recovered_as_error() {
        // Nothing listens on this port.
        let client = build_client(Duration::from_millis(500)).unwrap();
        let result = fetch_html(&client, "http://127.0.0.1:1/").await;
        assert!(result.is_err());
    }
}
