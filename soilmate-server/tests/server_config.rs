//! Tests that the server is reachable and configured correctly

mod common;

use serde_json::Value;

#[tokio::test]
async fn server_state_uses_standard_catalog() {
    let (state, _addr) = common::create_test_server().await;
    assert_eq!(state.matcher.catalog().len(), 6);
    assert!(state.integrations.email.transport_name().is_none());
}

#[tokio::test]
async fn health_is_served_over_tcp() {
    let (_state, addr) = common::create_test_server().await;
    let body: Value = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn landing_visit_returns_attribution_cookies() {
    let (_state, addr) = common::create_test_server().await;
    let response = reqwest::Client::new()
        .get(format!("http://{}/?utm_source=google&gclid=abc", addr))
        .header("referer", "https://www.google.com/")
        .send()
        .await
        .unwrap();

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("utm_source=google;")));
    assert!(cookies.iter().any(|c| c.starts_with("gclid=abc;")));
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("initial_referrer=https%3A%2F%2Fwww.google.com%2F;")));
    assert!(cookies.iter().any(|c| c.starts_with(
        "landing_page=%2F%3Futm_source%3Dgoogle%26gclid%3Dabc;"
    )));
    assert!(cookies.iter().all(|c| c.contains("Path=/") && c.contains("SameSite=Lax")));
}
