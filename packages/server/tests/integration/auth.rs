use reqwest::Method;
use serde_json::json;

use crate::common::{TestApp, listing_fields, routes};

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = TestApp::spawn().await;

    let res = app
        .post_json(routes::LOGIN, &json!({ "password": "wrong-password" }))
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"].as_str().unwrap(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn login_rejects_empty_password() {
    let app = TestApp::spawn().await;

    let res = app.post_json(routes::LOGIN, &json!({ "password": "" })).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn login_token_is_accepted_by_session_endpoint() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app.get_with_token(routes::SESSION, &token).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["subject"].as_str().unwrap(), "admin");
}

#[tokio::test]
async fn admin_mutations_require_a_token() {
    let app = TestApp::spawn().await;

    let res = app
        .send_form(
            Method::POST,
            routes::LISTINGS,
            &listing_fields(),
            &[],
            &[],
            None,
        )
        .await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"].as_str().unwrap(), "TOKEN_MISSING");

    let res = app.delete_without_token(&routes::listing(1)).await;
    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .get_with_token(routes::SESSION, "not-a-real-token")
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"].as_str().unwrap(), "TOKEN_INVALID");
}
