//! Outbound email channel.

pub mod brevo;

use async_trait::async_trait;

use fibra_core::result::AppResult;

pub use brevo::BrevoMailer;

/// Sends an email to a list of recipients.
///
/// Implementations must treat every failure as reportable but non-fatal:
/// the fan-out logs the error and carries on. Dispatch is never part of
/// a database transaction.
#[async_trait]
pub trait EmailChannel: Send + Sync + std::fmt::Debug {
    /// Send one email to all recipients.
    async fn send(&self, recipients: &[String], subject: &str, body: &str) -> AppResult<()>;
}
