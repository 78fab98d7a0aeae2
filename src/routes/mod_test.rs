use std::path::Path;

use super::*;

#[tokio::test]
async fn healthz_is_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[tokio::test]
async fn app_builds_without_mail_transport() {
    let _router = app(AppState::default(), Path::new("public"));
}
