use gatehouse_adapters::http::{
    ErrorResponse, TokenResponse,
    routes::VerifyTokenResponse,
};
use gatehouse_core::AccountState;
use reqwest::StatusCode;

use crate::helpers::{TestApp, get_random_identity};

async fn login(app: &TestApp) -> (String, String) {
    let identity = get_random_identity();
    app.add_credential(&identity, "correct", AccountState::Active)
        .await;

    let token = app
        .post_login(&serde_json::json!({ "identity": identity, "secret": "correct" }))
        .await
        .json::<TokenResponse>()
        .await
        .unwrap()
        .token;

    (identity, token)
}

#[tokio::test]
async fn should_return_200_and_subject_for_issued_token() {
    let app = TestApp::new().await;
    let (identity, token) = login(&app).await;

    let response = app
        .post_verify_token(&serde_json::json!({ "token": token }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<VerifyTokenResponse>().await.unwrap();
    assert_eq!(body.sub, identity);
    assert!(body.exp > chrono::Utc::now().timestamp());
}

#[tokio::test]
async fn should_return_401_if_invalid_token() {
    let app = TestApp::new().await;
    let (_, token) = login(&app).await;
    let mut tampered = token.clone();
    tampered.pop();

    for token in ["", "invalid_token", tampered.as_str()] {
        let response = app
            .post_verify_token(&serde_json::json!({ "token": token }))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<ErrorResponse>().await.unwrap().error,
            "invalid token"
        );
    }
}

#[tokio::test]
async fn should_return_401_if_malformed_input() {
    let app = TestApp::new().await;

    let response = app
        .post_verify_token(&serde_json::json!({ "jwt": "abc" }))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
