//! Contact relay route, `/api/contact`.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::services::contact::{self, ContactError, ContactSubmission};
use crate::state::AppState;

/// JSON body returned for every outcome.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl ContactResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    #[must_use]
    pub fn error(message: &'static str) -> Self {
        Self { ok: false, error: Some(message) }
    }
}

/// Map a relay error to its status code and public message. Transport detail
/// stays in the logs.
pub(crate) fn error_to_status(err: &ContactError) -> (StatusCode, &'static str) {
    match err {
        ContactError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        ContactError::MissingFields => (StatusCode::BAD_REQUEST, "Missing fields"),
        ContactError::NotConfigured | ContactError::Mailer(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Mailer error"),
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, message) = error_to_status(&self);
        (status, Json(ContactResponse::error(message))).into_response()
    }
}

/// `POST /api/contact`: validate a form submission and relay it by email.
///
/// Any other method answers 405 with the same JSON shape.
pub async fn submit(method: Method, State(state): State<AppState>, body: Bytes) -> Response {
    if method != Method::POST {
        return ContactError::MethodNotAllowed.into_response();
    }

    let submission_id = Uuid::new_v4();
    let submission = ContactSubmission::from_body(&body);

    match contact::relay(state.relay.as_ref(), submission).await {
        Ok(request) => {
            tracing::info!(%submission_id, source = %request.source, "contact submission relayed");
            (StatusCode::OK, Json(ContactResponse::ok())).into_response()
        }
        Err(err @ ContactError::MissingFields) => {
            tracing::debug!(%submission_id, "contact submission missing fields");
            err.into_response()
        }
        Err(err) => {
            tracing::error!(%submission_id, error = %err, "Mailer error");
            err.into_response()
        }
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
