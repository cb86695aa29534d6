//! # Notifier Module
//!
//! Delivers finished digests to a messaging channel.
//!
//! Long texts are split into line-aware slices that fit a single message,
//! each slice is escaped for Telegram's MarkdownV2 dialect and sent in order
//! with a fixed delay between messages to stay under the bot rate limits.

mod markdown;
mod notifier;

pub use markdown::{escape_markdown, split_escaped_message, split_message, MAX_MESSAGE_LEN};
pub use notifier::telegram::{TelegramError, TelegramNotifier};
pub use notifier::{deliver, DeliveryReport, Notifier};
