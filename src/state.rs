//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! relay is optional: the server still serves the static site when mail is
//! not configured, and contact submissions answer with a mailer error.

use crate::services::contact::MailRelay;

/// Shared application state. Clone is required by Axum; the mailer inside the
/// relay is Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub relay: Option<MailRelay>,
}

impl AppState {
    #[must_use]
    pub fn new(relay: Option<MailRelay>) -> Self {
        Self { relay }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
