//! Notification composition and Telegram delivery.
//!
//! This crate provides:
//! - [`message`] — building the human-readable notification body
//! - [`delivery`] — the retry-capable Telegram `sendMessage` client

pub mod delivery;
pub mod message;

pub use delivery::TelegramClient;
pub use message::{append_heartbeat, build_message};
