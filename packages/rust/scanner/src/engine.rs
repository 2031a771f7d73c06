//! The check engine: fetch, extract, diff against the baseline, persist.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local};
use tracing::{info, warn};
use url::Url;

use guidewatch_shared::{BaselineState, Candidate, Result, Summary};

use crate::extract::extract_candidates;
use crate::fetch::{build_client, fetch_html};
use crate::state::{load_state, save_state};

// ---------------------------------------------------------------------------
// CheckConfig / CheckOutcome
// ---------------------------------------------------------------------------

/// Runtime configuration for one checker run — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Page URLs to scan, in order.
    pub urls: Vec<String>,
    /// Baseline state file path.
    pub state_path: PathBuf,
    /// Explicit target year; `None` means current year + 1.
    pub target_year: Option<i32>,
    /// Per-fetch HTTP timeout.
    pub timeout: Duration,
    /// Treat first-run findings as detected.
    pub alert_on_first_run: bool,
}

/// Result of a completed checker run.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// The per-run report handed to the notifier.
    pub summary: Summary,
    /// Total candidates gathered across all pages.
    pub candidate_count: usize,
    /// Number of pages scanned.
    pub urls_scanned: usize,
}

impl CheckOutcome {
    /// Process exit code: 1 if every fetch failed and nothing was gathered,
    /// 2 if an update was detected, 0 otherwise.
    pub fn exit_code(&self) -> u8 {
        if !self.summary.fetch_errors.is_empty() && self.candidate_count == 0 {
            1
        } else if self.summary.detected {
            2
        } else {
            0
        }
    }
}

/// Default target year: Japanese admissions pages list the next fiscal year.
pub fn default_target_year(now: DateTime<Local>) -> i32 {
    now.year() + 1
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Execute one full check run.
///
/// Pages are fetched strictly one at a time; a fetch failure is recorded as
/// a string error and contributes an empty candidate list for that URL. The
/// baseline is rewritten in full on every run, even when all fetches failed.
/// State file I/O failures propagate.
pub async fn run_check(config: &CheckConfig, now: DateTime<Local>) -> Result<CheckOutcome> {
    let target_year = config.target_year.unwrap_or_else(|| default_target_year(now));
    let client = build_client(config.timeout)?;

    info!(
        urls = config.urls.len(),
        target_year,
        state = %config.state_path.display(),
        "starting check run"
    );

    let mut current_items: Vec<Candidate> = Vec::new();
    let mut fetch_errors: Vec<String> = Vec::new();

    for url in &config.urls {
        let page_items = match scan_page(&client, url).await {
            Ok(items) => items,
            Err(message) => {
                warn!(url, error = %message, "page fetch failed");
                fetch_errors.push(format!("{url}: {message}"));
                Vec::new()
            }
        };
        info!(url, candidates = page_items.len(), "page scanned");
        current_items.extend(page_items);
    }

    let mut current_keys: Vec<String> = current_items.iter().map(Candidate::key).collect();
    current_keys.sort();
    current_keys.dedup();

    let target_hits: Vec<Candidate> = current_items
        .iter()
        .filter(|c| c.years.contains(&target_year))
        .cloned()
        .collect();

    let previous = load_state(&config.state_path)?;
    let first_run = previous.is_none();
    let previous_keys: Vec<String> = previous.map(|s| s.seen_keys).unwrap_or_default();

    let new_items: Vec<Candidate> = current_items
        .iter()
        .filter(|c| !previous_keys.contains(&c.key()))
        .cloned()
        .collect();

    // On a first run without the override, everything is "new", so novelty
    // alone must not trigger; only target-year hits count.
    let detected = !target_hits.is_empty()
        || (!new_items.is_empty() && (config.alert_on_first_run || !first_run));

    let new_state = BaselineState {
        updated_at: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
        urls: config.urls.clone(),
        target_year,
        seen_keys: current_keys,
        items: current_items.clone(),
    };
    save_state(&config.state_path, &new_state)?;

    info!(
        detected,
        first_run,
        hits = target_hits.len(),
        new_items = new_items.len(),
        errors = fetch_errors.len(),
        "check run complete"
    );

    Ok(CheckOutcome {
        summary: Summary {
            detected,
            first_run,
            target_year,
            target_year_hits: target_hits,
            new_items,
            fetch_errors,
        },
        candidate_count: current_items.len(),
        urls_scanned: config.urls.len(),
    })
}

/// Fetch and extract one page. Errors are rendered as strings for the summary.
async fn scan_page(client: &reqwest::Client, url: &str) -> std::result::Result<Vec<Candidate>, String> {
    let base_url = Url::parse(url).map_err(|e| e.to_string())?;
    let html = fetch_html(client, url).await.map_err(|e| e.to_string())?;
    Ok(extract_candidates(&base_url, &html))
}

#[cfg(test)]
mod engine_tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(urls: Vec<String>, state_path: PathBuf) -> CheckConfig {
        CheckConfig {
            urls,
            state_path,
            target_year: Some(2027),
            timeout: Duration::from_secs(2),
            alert_on_first_run: false,
        }
    }

    fn temp_state(tag: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("gw-engine-{tag}-{}", std::process::id()));
        let path = dir.join("state.json");
        (dir, path)
    }

    #[tokio::test]
    async fn detects_target_year_hit_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admission/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body><a href="/2027.pdf">2027年度 募集要項</a></body></html>"#,
            ))
            .mount(&server)
            .await;

        let (dir, state_path) = temp_state("hit");
        let config = test_config(vec![format!("{}/admission/", server.uri())], state_path);

        let outcome = run_check(&config, Local::now()).await.unwrap();

        assert_eq!(outcome.summary.target_year_hits.len(), 1);
        assert_eq!(outcome.summary.target_year_hits[0].years, vec![2027]);
        assert!(outcome.summary.detected);
        assert!(outcome.summary.first_run);
        assert_eq!(outcome.exit_code(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn all_fetches_failing_exits_one() {
        // Nothing listens on these ports.
        let urls = vec![
            "http://127.0.0.1:1/a".to_string(),
            "http://127.0.0.1:1/b".to_string(),
        ];
        let (dir, state_path) = temp_state("allfail");
        let config = test_config(urls.clone(), state_path.clone());

        let outcome = run_check(&config, Local::now()).await.unwrap();

        assert_eq!(outcome.summary.fetch_errors.len(), urls.len());
        assert_eq!(outcome.candidate_count, 0);
        assert!(!outcome.summary.detected);
        assert_eq!(outcome.exit_code(), 1);

        // State is still rewritten, with empty candidate lists.
        let state = load_state(&state_path).unwrap().expect("state written");
        assert!(state.items.is_empty());
        assert_eq!(state.urls, urls);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn first_run_suppresses_new_item_detection() {
        let server = MockServer::start().await;
        // Relevant, but not the target year.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/2026.pdf">2026年度 募集要項</a>"#,
            ))
            .mount(&server)
            .await;

        let (dir, state_path) = temp_state("firstrun");
        let config = test_config(vec![server.uri()], state_path);

        let outcome = run_check(&config, Local::now()).await.unwrap();

        assert!(outcome.summary.first_run);
        assert_eq!(outcome.summary.new_items.len(), 1);
        assert!(outcome.summary.target_year_hits.is_empty());
        assert!(!outcome.summary.detected);
        assert_eq!(outcome.exit_code(), 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn alert_on_first_run_overrides_suppression() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/2026.pdf">2026年度 募集要項</a>"#,
            ))
            .mount(&server)
            .await;

        let (dir, state_path) = temp_state("alertfirst");
        let mut config = test_config(vec![server.uri()], state_path);
        config.alert_on_first_run = true;

        let outcome = run_check(&config, Local::now()).await.unwrap();

        assert!(outcome.summary.first_run);
        assert!(outcome.summary.detected);
        assert_eq!(outcome.exit_code(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn diff_reports_only_unseen_keys() {
        let server = MockServer::start().await;
        // Second run serves A and C; baseline below holds A and B.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"
                <a href="/a.pdf">2026年度 募集要項</a>
                <a href="/c.pdf">2026年度 募集要項 別表</a>
                "#,
            ))
            .mount(&server)
            .await;

        let (dir, state_path) = temp_state("diff");
        let base = server.uri();
        let key_a = format!("{base}/a.pdf::2026年度 募集要項");
        let key_b = format!("{base}/b.pdf::2026年度 募集要項");
        save_state(
            &state_path,
            &BaselineState {
                updated_at: "2026-08-01T00:00:00".into(),
                urls: vec![base.clone()],
                target_year: 2027,
                seen_keys: vec![key_a, key_b],
                items: vec![],
            },
        )
        .unwrap();

        let config = test_config(vec![base.clone()], state_path);
        let outcome = run_check(&config, Local::now()).await.unwrap();

        assert!(!outcome.summary.first_run);
        assert_eq!(outcome.summary.new_items.len(), 1);
        assert_eq!(outcome.summary.new_items[0].url, format!("{base}/c.pdf"));
        // A new item on a non-first run is detected even without a year hit.
        assert!(outcome.summary.detected);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn unchanged_page_yields_no_update() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/2026.pdf">2026年度 募集要項</a>"#,
            ))
            .mount(&server)
            .await;

        let (dir, state_path) = temp_state("steady");
        let config = test_config(vec![server.uri()], state_path);

        // First run initializes the baseline; second sees nothing new.
        let first = run_check(&config, Local::now()).await.unwrap();
        assert!(first.summary.first_run);
        let second = run_check(&config, Local::now()).await.unwrap();
        assert!(!second.summary.first_run);
        assert!(second.summary.new_items.is_empty());
        assert!(!second.summary.detected);
        assert_eq!(second.exit_code(), 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn partial_failure_keeps_other_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admission/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/2027.pdf">2027年度 募集要項</a>"#,
            ))
            .mount(&server)
            .await;

        let (dir, state_path) = temp_state("partial");
        let good = format!("{}/admission/", server.uri());
        let bad = "http://127.0.0.1:1/down".to_string();
        let config = test_config(vec![bad.clone(), good], state_path);

        let outcome = run_check(&config, Local::now()).await.unwrap();

        assert_eq!(outcome.summary.fetch_errors.len(), 1);
        assert!(outcome.summary.fetch_errors[0].starts_with(&bad));
        assert_eq!(outcome.candidate_count, 1);
        assert!(outcome.summary.detected);
        assert_eq!(outcome.exit_code(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_target_year_is_next_year() {
        let now = Local::now();
        assert_eq!(default_target_year(now), now.year() + 1);
    }
}
