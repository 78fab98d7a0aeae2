//! Contact form relay service.
//!
//! Validates a raw form submission, renders the notification email and hands
//! it to the configured [`Mailer`]. Stateless: every call stands alone.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::mail::{MailError, Mailer, OutgoingEmail};

pub const SUBJECT: &str = "Nuevo contacto — Levantiq";
pub const DEFAULT_SOURCE: &str = "levantiq-web";
const EMPTY_FIELD: &str = "-";

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("missing required fields")]
    MissingFields,
    #[error("mail transport not configured")]
    NotConfigured,
    #[error("mailer error: {0}")]
    Mailer(#[from] MailError),
}

/// Raw submission body. Every field is optional so that an empty or partial
/// body still parses and validation decides what is missing.
#[derive(Debug, Default, Clone)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub service: Option<String>,
    pub source: Option<String>,
}

impl ContactSubmission {
    /// Lenient body parse: anything but a JSON object is treated as `{}`.
    ///
    /// Fields are read one by one, so a badly typed field only loses itself.
    /// Required fields must be strings; optional scalars (a phone sent as a
    /// number) are kept as their JSON text.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        let fields: Map<String, Value> = serde_json::from_slice(body).unwrap_or_default();
        Self {
            name: string_field(&fields, "name"),
            email: string_field(&fields, "email"),
            message: string_field(&fields, "message"),
            phone: scalar_field(&fields, "phone"),
            company: scalar_field(&fields, "company"),
            service: scalar_field(&fields, "service"),
            source: scalar_field(&fields, "source"),
        }
    }

    /// Check required fields and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::MissingFields`] if `name`, `email` or `message`
    /// is absent or blank.
    pub fn validate(self) -> Result<ContactRequest, ContactError> {
        let (Some(name), Some(email), Some(message)) =
            (present(self.name), present(self.email), present(self.message))
        else {
            return Err(ContactError::MissingFields);
        };

        Ok(ContactRequest {
            name,
            email,
            message,
            phone: present(self.phone),
            company: present(self.company),
            service: present(self.service),
            source: present(self.source).unwrap_or_else(|| DEFAULT_SOURCE.to_owned()),
        })
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn scalar_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(text) => Some(text.clone()),
        value @ (Value::Number(_) | Value::Bool(_)) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// A validated submission with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub source: String,
}

/// Sender and recipient for relayed submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
}

#[must_use]
pub fn render_email_text(req: &ContactRequest) -> String {
    let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| EMPTY_FIELD.to_owned());
    format!(
        "Nombre:   {}\nEmail:    {}\nTeléfono: {}\nEmpresa:  {}\nServicio: {}\nOrigen:   {}\n\nMensaje:\n{}",
        req.name,
        req.email,
        or_dash(&req.phone),
        or_dash(&req.company),
        or_dash(&req.service),
        req.source,
        req.message,
    )
}

#[must_use]
pub fn compose_email(req: &ContactRequest, envelope: &Envelope) -> OutgoingEmail {
    OutgoingEmail {
        from: envelope.from.clone(),
        to: envelope.to.clone(),
        reply_to: req.email.clone(),
        subject: SUBJECT.to_owned(),
        text: render_email_text(req),
    }
}

/// A configured transport plus the envelope every submission is sent with.
#[derive(Clone)]
pub struct MailRelay {
    pub mailer: Arc<dyn Mailer>,
    pub envelope: Envelope,
}

impl MailRelay {
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, from: String, to: String) -> Self {
        Self { mailer, envelope: Envelope { from, to } }
    }
}

/// Validate and relay one submission. The send is attempted once.
///
/// Validation runs before the transport check, so a bad submission is
/// reported as such even when mail is not configured.
///
/// # Errors
///
/// Returns [`ContactError::MissingFields`] on validation failure,
/// [`ContactError::NotConfigured`] when no transport is available, and
/// [`ContactError::Mailer`] when delivery fails.
pub async fn relay(relay: Option<&MailRelay>, submission: ContactSubmission) -> Result<ContactRequest, ContactError> {
    let request = submission.validate()?;
    let relay = relay.ok_or(ContactError::NotConfigured)?;
    relay
        .mailer
        .send(&compose_email(&request, &relay.envelope))
        .await?;
    Ok(request)
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
