mod config;
mod mail;
mod routes;
mod services;
mod state;

use services::contact::MailRelay;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let server = config::ServerConfig::from_env().expect("invalid server config");

    // Mail transport is non-fatal: the static site is still served without it.
    let relay = match config::MailConfig::from_env() {
        Ok(mail) => match mail::build_mailer(&mail.transport) {
            Ok(mailer) => {
                tracing::info!(transport = mailer.name(), to = %mail.to, "mail transport initialized");
                Some(MailRelay::new(mailer, mail.from, mail.to))
            }
            Err(e) => {
                tracing::warn!(transport = mail.transport.kind(), error = %e, "mail transport setup failed; contact submissions disabled");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "mail transport not configured; contact submissions disabled");
            None
        }
    };

    let state = state::AppState::new(relay);
    let app = routes::app(state, &server.website_dir);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", server.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = server.port, website_dir = %server.website_dir.display(), "levantiq listening");
    axum::serve(listener, app).await.expect("server failed");
}
