use futures::future::join_all;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

use echo_service::config::Config;

use crate::common::{spawn_server, test_config};

#[tokio::test]
async fn root_reports_development_by_default() {
    let base = spawn_server(test_config()).await;

    let body: Value = reqwest::get(format!("{base}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        json!({
            "message": "Hello from Integration API!",
            "service": "Integration API",
            "environment": "development",
            "version": env!("CARGO_PKG_VERSION"),
        })
    );
}

#[tokio::test]
async fn environment_is_stable_for_process_lifetime() {
    let base = spawn_server(Config {
        environment: "production".to_string(),
        ..test_config()
    })
    .await;
    let client = reqwest::Client::new();

    for _ in 0..5 {
        let body: Value = client
            .get(format!("{base}/"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["environment"], "production");
    }
}

#[tokio::test]
async fn health_is_idempotent() {
    let base = spawn_server(test_config()).await;
    let client = reqwest::Client::new();

    // Interleave other traffic to show health does not depend on it.
    client
        .post(format!("{base}/echo"))
        .json(&json!({"noise": true}))
        .send()
        .await
        .unwrap();

    for _ in 0..3 {
        let response = client.get(format!("{base}/health")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"status": "healthy", "service": "Integration API"}));
    }
}

#[tokio::test]
async fn echo_returns_nested_payload() {
    let base = spawn_server(test_config()).await;
    let payload = json!({"message": "hi", "data": {"k": 1}});

    let response = reqwest::Client::new()
        .post(format!("{base}/echo"))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"echo": payload, "service": "Integration API"}));
}

#[tokio::test]
async fn echo_round_trips_assorted_values() {
    let base = spawn_server(test_config()).await;
    let client = reqwest::Client::new();

    for payload in [
        json!(null),
        json!(true),
        json!(-12.5),
        json!("text with \"quotes\" and unicode \u{2603}"),
        json!([1, "two", {"three": [3]}]),
        json!({}),
    ] {
        let body: Value = client
            .post(format!("{base}/echo"))
            .json(&payload)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["echo"], payload);
    }
}

#[tokio::test]
async fn echo_with_empty_body_is_rejected() {
    let base = spawn_server(test_config()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/echo"))
        .header("content-type", "application/json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let base = spawn_server(test_config()).await;

    let response = reqwest::get(format!("{base}/nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_echoes_do_not_leak_between_requests() {
    let base = spawn_server(test_config()).await;
    let client = reqwest::Client::new();

    let requests = (0..100).map(|i| {
        let client = client.clone();
        let url = format!("{base}/echo");
        async move {
            let payload = json!({"id": i, "data": format!("payload-{i}")});
            let body: Value = client
                .post(url)
                .json(&payload)
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            (payload, body)
        }
    });

    for (sent, received) in join_all(requests).await {
        assert_eq!(received["echo"], sent);
    }
}
