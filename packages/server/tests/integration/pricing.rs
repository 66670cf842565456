use serde_json::json;

use crate::common::{TestApp, routes};

fn quote_request() -> serde_json::Value {
    json!({
        "make": "Honda",
        "model": "CB350",
        "year": 2021,
        "condition": "Good",
        "km_driven": 5000,
    })
}

#[tokio::test]
async fn suggest_price_returns_a_quote() {
    let app = TestApp::spawn().await;

    let res = app.post_json(routes::PRICING_SUGGEST, &quote_request()).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["suggested_price"].as_i64().unwrap(), 145_000);
    assert!(!res.body["reasoning"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn suggest_price_rejects_implausible_year() {
    let app = TestApp::spawn().await;

    let mut request = quote_request();
    request["year"] = json!(1800);
    let res = app.post_json(routes::PRICING_SUGGEST, &request).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn suggest_price_rejects_unknown_condition() {
    let app = TestApp::spawn().await;

    let mut request = quote_request();
    request["condition"] = json!("Mint");
    let res = app.post_json(routes::PRICING_SUGGEST, &request).await;

    assert_eq!(res.status, 400);
}
