//! Page scanning and change detection for guideline postings.
//!
//! This crate provides:
//! - [`textscan`] — year extraction and whitespace normalization
//! - [`classify`] — the anchor relevance classifier
//! - [`extract`] — anchor candidate extraction from fetched HTML
//! - [`fetch`] — sequential page fetching
//! - [`state`] — baseline state persistence
//! - [`engine`] — the full check run (fetch → extract → diff → persist)

pub mod classify;
pub mod engine;
pub mod extract;
pub mod fetch;
pub mod state;
pub mod textscan;

pub use classify::is_relevant;
pub use engine::{CheckConfig, CheckOutcome, default_target_year, run_check};
pub use extract::extract_candidates;
pub use fetch::{build_client, fetch_html};
pub use state::{load_state, save_state};
pub use textscan::{extract_years, normalize_space, reiwa_to_year, to_half_width_digits};
