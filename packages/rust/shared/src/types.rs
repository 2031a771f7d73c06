//! Core domain types for the guideline watch pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// One classified anchor extracted from an admissions page, believed to
/// reference a guideline document.
///
/// Identity is the `(url, text)` pair; the extracted `years` are derived
/// data and do not participate in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Absolute URL the anchor resolves to.
    pub url: String,
    /// Whitespace-normalized anchor label.
    pub text: String,
    /// Ascending, deduplicated years parsed from the label + URL.
    pub years: Vec<i32>,
}

impl Candidate {
    /// Stable identity key, used for baseline diffing across runs.
    pub fn key(&self) -> String {
        format!("{}::{}", self.url, self.text)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.text == other.text
    }
}

impl Eq for Candidate {}

// ---------------------------------------------------------------------------
// BaselineState
// ---------------------------------------------------------------------------

/// The persisted baseline, rewritten wholesale after every checker run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineState {
    /// ISO-8601 local timestamp of the run that wrote this state.
    pub updated_at: String,
    /// Source URLs scanned on that run.
    pub urls: Vec<String>,
    /// Target academic year used on that run.
    pub target_year: i32,
    /// Sorted identity keys of every candidate seen on that run.
    pub seen_keys: Vec<String>,
    /// Full candidate list from that run.
    pub items: Vec<Candidate>,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Ephemeral per-run report — the sole interface between checker and notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Whether this run warrants an alert.
    pub detected: bool,
    /// Whether no baseline state existed before this run.
    pub first_run: bool,
    /// Target academic year this run watched for.
    pub target_year: i32,
    /// Candidates whose year set contains the target year.
    pub target_year_hits: Vec<Candidate>,
    /// Candidates absent from the previous baseline's key set.
    pub new_items: Vec<Candidate>,
    /// Per-URL fetch failures, rendered as `"{url}: {error}"`.
    pub fetch_errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Candidate {
        Candidate {
            url: "https://example.org/admission/2027.pdf".into(),
            text: "2027年度 募集要項".into(),
            years: vec![2027],
        }
    }

    #[test]
    fn candidate_key_is_url_and_text() {
        let c = sample();
        assert_eq!(c.key(), "https://example.org/admission/2027.pdf::2027年度 募集要項");
    }

    #[test]
    fn candidate_equality_ignores_years() {
        let a = sample();
        let mut b = sample();
        b.years = vec![];
        assert_eq!(a, b);
    }

    #[test]
    fn summary_roundtrip() {
        let summary = Summary {
            detected: true,
            first_run: false,
            target_year: 2027,
            target_year_hits: vec![sample()],
            new_items: vec![],
            fetch_errors: vec!["https://example.org/: timed out".into()],
        };

        let json = serde_json::to_string_pretty(&summary).expect("serialize");
        let parsed: Summary = serde_json::from_str(&json).expect("deserialize");
        assert!(parsed.detected);
        assert_eq!(parsed.target_year_hits.len(), 1);
        assert_eq!(parsed.fetch_errors.len(), 1);
    }

    #[test]
    fn state_roundtrip() {
        let state = BaselineState {
            updated_at: "2026-08-26T12:00:00".into(),
            urls: vec!["https://example.org/admission/".into()],
            target_year: 2027,
            seen_keys: vec![sample().key()],
            items: vec![sample()],
        };

        let json = serde_json::to_string(&state).expect("serialize");
        let parsed: BaselineState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.target_year, 2027);
        assert_eq!(parsed.items[0].years, vec![2027]);
    }
}
