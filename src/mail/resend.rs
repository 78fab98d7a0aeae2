//! Resend HTTP API transport.

use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

use super::{MailError, Mailer, OutgoingEmail};

pub struct ResendMailer {
    client: Resend,
}

impl ResendMailer {
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self { client: Resend::new(api_key) }
    }
}

#[async_trait::async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let to = [email.to.as_str()];
        let options = CreateEmailBaseOptions::new(&email.from, to, &email.subject)
            .with_text(&email.text)
            .with_reply(&email.reply_to);
        self.client
            .emails
            .send(options)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}
