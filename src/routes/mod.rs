//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The marketing site is served as static files at `/`; the only dynamic
//! endpoint is the contact relay. CORS is permissive so the form can post
//! from a separately hosted copy of the site.

pub mod contact;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, website_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // `any` so that non-POST methods reach the handler and get the JSON 405.
    Router::new()
        .route("/api/contact", any(contact::submit))
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(website_dir).append_index_html_on_directories(true))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
