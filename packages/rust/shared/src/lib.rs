//! Shared types, error model, and configuration for guidewatch.
//!
//! This crate is the foundation depended on by all other guidewatch crates.
//! It provides:
//! - [`GuidewatchError`] — the unified error type
//! - Domain types ([`Candidate`], [`BaselineState`], [`Summary`])
//! - Configuration ([`AppConfig`], config loading, env helpers)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_STATE_PATH, DEFAULT_URLS, TelegramConfig, WatchConfig, config_dir,
    config_file_path, env_flag, load_config, load_config_from, required_env,
};
pub use error::{GuidewatchError, Result};
pub use types::{BaselineState, Candidate, Summary};
