//! Relevance classification for extracted anchors.

use crate::textscan::{extract_years, normalize_space};

/// Path tokens that mark an admissions-related URL.
const URL_TOKENS: &[&str] = &["guideline", "admission", "examinees", "bosyu", "youkou"];

/// Guideline keyword, in both script variants seen in the wild.
const GUIDELINE_TERMS: &[&str] = &["募集要項", "募集要项"];

/// Decide whether an anchor is worth tracking.
///
/// The text must carry a guideline keyword, AND at least one corroborating
/// signal must hold: a year was extracted, the looser `年度` indicator is
/// present, or the URL path contains an admissions token. Both sides of the
/// conjunction must independently be true.
pub fn is_relevant(text: &str, url: &str) -> bool {
    let t = normalize_space(text);
    let u = url.to_lowercase();

    let has_guideline_term = GUIDELINE_TERMS.iter().any(|k| t.contains(k));
    let has_year_hint = !extract_years(&t).is_empty() || t.contains("年度");
    let has_guideline_url = URL_TOKENS.iter().any(|k| u.contains(k));

    has_guideline_term && (has_year_hint || has_guideline_url)
}
