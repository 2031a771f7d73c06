//! Year and whitespace normalization for JP/EN page text.
//!
//! Admissions pages mix full-width digits, Japanese era years (令和) and
//! western years, so every extractor first folds digits to ASCII and then
//! matches three independent patterns. All functions here are pure and
//! total: no input fails, absence of matches yields an empty set.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches `YYYY年度` (optionally spaced), western calendar.
static WESTERN_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(20\d{2})\s*年度").expect("western year regex"));

/// Matches `令和N年度` (the 年度 suffix may be truncated to 年).
static ERA_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"令和\s*([0-9]{1,2})\s*年度?").expect("era year regex"));

/// Matches a parenthesized western year, e.g. `(2027)`.
static PAREN_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((20\d{2})\)").expect("paren year regex"));

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Fold full-width digits (U+FF10..U+FF19) to their ASCII equivalents.
pub fn to_half_width_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Collapse all whitespace runs (including ideographic space) to single
/// ASCII spaces and trim.
pub fn normalize_space(text: &str) -> String {
    text.replace('\u{3000}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a Reiwa era year to the western calendar (Reiwa 1 = 2019).
pub fn reiwa_to_year(reiwa: i32) -> i32 {
    reiwa + 2018
}

// ---------------------------------------------------------------------------
// Year extraction
// ---------------------------------------------------------------------------

/// Extract every academic year mentioned in `text`.
///
/// Unions the matches of all three patterns and returns the deduplicated,
/// ascending set.
pub fn extract_years(text: &str) -> Vec<i32> {
    let text = to_half_width_digits(text);
    let mut years: BTreeSet<i32> = BTreeSet::new();

    for caps in WESTERN_YEAR_RE.captures_iter(&text) {
        if let Ok(year) = caps[1].parse::<i32>() {
            years.insert(year);
        }
    }

    for caps in ERA_YEAR_RE.captures_iter(&text) {
        if let Ok(era) = caps[1].parse::<i32>() {
            years.insert(reiwa_to_year(era));
        }
    }

    for caps in PAREN_YEAR_RE.captures_iter(&text) {
        if let Ok(year) = caps[1].parse::<i32>() {
            years.insert(year);
        }
    }

    years.into_iter().collect()
}
