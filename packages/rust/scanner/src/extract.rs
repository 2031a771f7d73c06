//! Anchor candidate extraction from a fetched page.

use std::collections::HashSet;

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use guidewatch_shared::Candidate;

use crate::classify::is_relevant;
use crate::textscan::{extract_years, normalize_space};

/// Extract all guideline candidates from a page.
///
/// Iterates `<a>` elements in document order, resolves each `href` against
/// `base_url` (a missing href behaves like an empty one, which resolves to
/// the base), classifies the merged anchor-text + URL string, and
/// deduplicates by identity key — first occurrence wins. Output preserves
/// anchor appearance order.
pub fn extract_candidates(base_url: &Url, html: &str) -> Vec<Candidate> {
    let doc = Html::parse_document(html);
    let anchor_sel = Selector::parse("a").unwrap();

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut seen_keys: HashSet<String> = HashSet::new();

    for el in doc.select(&anchor_sel) {
        let text = normalize_space(&el.text().collect::<String>());
        let href = el.value().attr("href").unwrap_or("");

        let resolved = match base_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "unresolvable href, skipping anchor");
                continue;
            }
        };

        let merged = format!("{text} {resolved}");
        if !is_relevant(&merged, resolved.as_str()) {
            continue;
        }

        let item = Candidate {
            url: resolved.to_string(),
            text,
            years: extract_years(&merged),
        };

        if !seen_keys.insert(item.key()) {
            continue;
        }
        candidates.push(item);
    }

    candidates
}
