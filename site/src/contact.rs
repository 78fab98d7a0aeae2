//! Contact form behavior: service prefill, honeypot, payload shaping and the
//! feedback shown after a submit.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use serde::Serialize;

pub const DEFAULT_ENDPOINT: &str = "/api/contact";
pub const SOURCE_TAG: &str = "levantiq-contacto";

/// Hidden field that humans leave empty.
pub const HONEYPOT_FIELD: &str = "_hp";
/// Hidden field carrying the relay URL.
pub const ENDPOINT_FIELD: &str = "_endpoint";
pub const SERVICE_FIELD: &str = "service";

pub const INVALID_TEXT: &str = "Revisa los campos marcados en rojo.";
pub const SUCCESS_TEXT: &str = "¡Gracias! Hemos recibido tu mensaje.";
pub const FAILURE_TEXT: &str = "Hubo un problema al enviar. Inténtalo de nuevo.";

pub const LEAD_EVENT: &str = "lead_submit";
const NO_SERVICE: &str = "(none)";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("relay answered {0}")]
    Status(u16),
}

/// Map a relay response status to success or failure.
///
/// # Errors
///
/// Returns [`SubmitError::Status`] for anything outside 2xx.
pub fn check_status(status: u16) -> Result<(), SubmitError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SubmitError::Status(status))
    }
}

/// Raw form values as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    /// Hidden service field.
    pub service: String,
    pub honeypot: String,
    pub endpoint: String,
}

/// JSON body posted to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub service: String,
    pub source: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Honeypot filled: drop silently.
    Spam,
    Send { endpoint: String, payload: ContactPayload },
}

/// Shape a validated form into what gets posted. `query_service` is the
/// `?service=` value of the page URL, used when the hidden field is empty.
#[must_use]
pub fn prepare(fields: &FormFields, query_service: Option<&str>) -> Submission {
    if !fields.honeypot.trim().is_empty() {
        return Submission::Spam;
    }

    let service = match fields.service.trim() {
        "" => query_service.unwrap_or_default().trim(),
        hidden => hidden,
    };
    let endpoint = match fields.endpoint.trim() {
        "" => DEFAULT_ENDPOINT,
        configured => configured,
    };

    Submission::Send {
        endpoint: endpoint.to_owned(),
        payload: ContactPayload {
            name: fields.name.trim().to_owned(),
            email: fields.email.trim().to_owned(),
            phone: fields.phone.trim().to_owned(),
            company: fields.company.trim().to_owned(),
            message: fields.message.trim().to_owned(),
            service: service.to_owned(),
            source: SOURCE_TAG,
        },
    }
}

/// Message prefix announcing the service the visitor came for.
#[must_use]
pub fn message_prefix(service: &str) -> Option<String> {
    let service = service.trim();
    (!service.is_empty()).then(|| format!("[Interés: {service}] "))
}

/// Message text to show after prefill: only an empty message is prefixed.
#[must_use]
pub fn prefill_message(current: &str, service: Option<&str>) -> Option<String> {
    if !current.trim().is_empty() {
        return None;
    }
    service.and_then(message_prefix)
}

/// Parameters of the analytics event sent after a successful submit.
#[must_use]
pub fn lead_event(form_id: &str, service: &str) -> serde_json::Value {
    let service = if service.is_empty() { NO_SERVICE } else { service };
    serde_json::json!({ "form": form_id, "service": service })
}
