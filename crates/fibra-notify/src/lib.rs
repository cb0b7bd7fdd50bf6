//! # fibra-notify
//!
//! Notification fan-out for Fibra Core: persisted notifications per target
//! user, an optional batched email relay, the dedup-window variant used by
//! recurring data-quality checks, and the read-side routing of notification
//! types to application modules.

pub mod actions;
pub mod email;
pub mod fanout;
pub mod routing;
pub mod store;

pub use email::EmailChannel;
pub use fanout::{DedupeOutcome, FanoutReport, Notifier};
pub use routing::{UnreadSummary, modules_for_type};
pub use store::{NotificationStore, Recipient, UserDirectory};
