use std::time::{Duration, Instant};

use gatehouse_adapters::http::{ErrorResponse, TokenResponse};
use gatehouse_core::AccountState;
use reqwest::{StatusCode, header::HeaderMap};

use crate::helpers::{TestApp, get_random_identity};

fn comparable(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut headers: Vec<_> = headers
        .iter()
        .filter(|(name, _)| *name != reqwest::header::DATE)
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or_default().to_owned(),
            )
        })
        .collect();
    headers.sort();
    headers
}

#[tokio::test]
async fn should_return_200_with_token_for_valid_credentials() {
    let app = TestApp::new().await;
    let identity = get_random_identity();
    app.add_credential(&identity, "correct", AccountState::Active)
        .await;

    let response = app
        .post_login(&serde_json::json!({ "identity": identity, "secret": "correct" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );

    let body = response
        .json::<TokenResponse>()
        .await
        .expect("Could not deserialize response body to TokenResponse");
    assert_eq!(body.token.split('.').count(), 3);
}

#[tokio::test]
async fn should_return_identical_401_for_wrong_secret_and_unknown_identity() {
    let app = TestApp::new().await;
    let identity = get_random_identity();
    app.add_credential(&identity, "correct", AccountState::Active)
        .await;

    let wrong_secret = app
        .post_login(&serde_json::json!({ "identity": identity, "secret": "wrong" }))
        .await;
    let unknown_identity = app
        .post_login(&serde_json::json!({ "identity": "ghost", "secret": "anything" }))
        .await;

    assert_eq!(wrong_secret.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_secret.status(), unknown_identity.status());
    assert_eq!(
        comparable(wrong_secret.headers()),
        comparable(unknown_identity.headers())
    );

    let wrong_secret = wrong_secret.text().await.unwrap();
    let unknown_identity = unknown_identity.text().await.unwrap();
    assert_eq!(wrong_secret, r#"{"error":"invalid credentials"}"#);
    assert_eq!(wrong_secret, unknown_identity);
}

#[tokio::test]
async fn should_return_same_401_for_locked_account() {
    let app = TestApp::new().await;
    let identity = get_random_identity();
    app.add_credential(&identity, "correct", AccountState::Locked)
        .await;

    let response = app
        .post_login(&serde_json::json!({ "identity": identity, "secret": "correct" }))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<ErrorResponse>().await.unwrap().error,
        "invalid credentials"
    );
}

#[tokio::test]
async fn should_treat_injection_strings_as_plain_identities() {
    let app = TestApp::new().await;
    app.add_credential("alice", "correct", AccountState::Active)
        .await;

    let response = app
        .post_login(&serde_json::json!({
            "identity": "alice' OR '1'='1",
            "secret": "anything"
        }))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"error":"invalid credentials"}"#
    );
}

#[tokio::test]
async fn should_return_400_for_malformed_input() {
    let app = TestApp::new().await;

    let test_cases = [
        "",
        "{",
        r#"{"identity":"alice"}"#,
        r#"{"identity":"","secret":"correct"}"#,
        r#"{"identity":"alice","secret":true}"#,
        r#"{"identity":"alice","secret":"correct","role":"admin"}"#,
    ];

    for test_case in test_cases {
        let response = app.post_login_raw(test_case).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "Failed for input: {:?}",
            test_case
        );
        assert_eq!(
            response.text().await.unwrap(),
            r#"{"error":"invalid request"}"#
        );
    }
}

#[tokio::test]
async fn should_return_json_400_for_oversized_body() {
    let app = TestApp::new().await;
    let padding = "a".repeat(gatehouse_adapters::config::MAX_REQUEST_BODY_BYTES * 4);
    let body = serde_json::json!({ "identity": "alice", "secret": padding }).to_string();

    let response = app.post_login_bytes(body.into_bytes()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"error":"invalid request"}"#
    );
}

#[tokio::test]
async fn should_return_405_for_non_post() {
    let app = TestApp::new().await;

    let response = app.get_login().await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.json::<ErrorResponse>().await.unwrap().error,
        "method not allowed"
    );
}

#[tokio::test]
async fn should_never_echo_the_secret() {
    let app = TestApp::new().await;
    let identity = get_random_identity();
    app.add_credential(&identity, "correct", AccountState::Active)
        .await;

    let secret = "s3cr3t-value-that-must-not-leak";
    for identity in [identity.as_str(), "ghost"] {
        let response = app
            .post_login(&serde_json::json!({ "identity": identity, "secret": secret }))
            .await;
        let body = response.text().await.unwrap();

        assert!(!body.contains(secret));
        assert!(!body.contains(identity));
    }
}

#[tokio::test]
async fn should_answer_unknown_identity_and_wrong_secret_in_same_time_envelope() {
    const ROUNDS: usize = 20;

    let app = TestApp::new().await;
    let identity = get_random_identity();
    app.add_credential(&identity, "correct", AccountState::Active)
        .await;

    let wrong = serde_json::json!({ "identity": identity, "secret": "wrong" });
    let ghost = serde_json::json!({ "identity": "ghost", "secret": "wrong" });

    // Warm up the connection pool and the blocking thread pool.
    app.post_login(&wrong).await;
    app.post_login(&ghost).await;

    let mut wrong_total = Duration::ZERO;
    let mut ghost_total = Duration::ZERO;
    for _ in 0..ROUNDS {
        let start = Instant::now();
        app.post_login(&wrong).await;
        wrong_total += start.elapsed();

        let start = Instant::now();
        app.post_login(&ghost).await;
        ghost_total += start.elapsed();
    }

    let ratio = wrong_total.as_secs_f64() / ghost_total.as_secs_f64();
    assert!(
        (0.5..2.0).contains(&ratio),
        "latency ratio {ratio} outside envelope (wrong {wrong_total:?}, ghost {ghost_total:?})"
    );
}
