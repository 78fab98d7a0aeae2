//! Outbound mail transports.
//!
//! DESIGN
//! ======
//! Route handlers depend on the [`Mailer`] trait only, so tests inject a
//! recording mock and production picks SMTP or Resend from config. A send is
//! attempted exactly once; retry policy, if any, belongs to the caller.

pub mod resend;
pub mod smtp;

use std::sync::Arc;

use crate::config::TransportConfig;

/// A fully addressed plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid address {address:?}: {reason}")]
    Address { address: String, reason: String },
    #[error("message build failed: {0}")]
    Build(String),
    #[error("transport setup failed: {0}")]
    Setup(String),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Async mail delivery seam.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one email.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Short transport name for logs.
    fn name(&self) -> &'static str;
}

/// Build the configured transport.
///
/// # Errors
///
/// Returns an error if the SMTP relay cannot be set up for the given host.
pub fn build_mailer(config: &TransportConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config {
        TransportConfig::Smtp(smtp) => Ok(Arc::new(smtp::SmtpMailer::new(smtp)?)),
        TransportConfig::Resend { api_key } => Ok(Arc::new(resend::ResendMailer::new(api_key))),
    }
}
