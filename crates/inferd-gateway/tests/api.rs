//! End-to-end tests for the gateway: the auth gate, the error
//! normalizer, and the capability groups wired together as in
//! production, exercised over real HTTP semantics.

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::{HeaderValue, StatusCode};
use axum_test::{TestServer, TestServerConfig};
use serde_json::{json, Value};

use inferd_auth::{AuthConfig, TokenIssuer, TokenValidator};
use inferd_gateway::{create_router, AppState, ServerConfig, PAYLOAD_TOO_LARGE_MESSAGE};
use inferd_inference::LinearModel;
use inferd_store::MemoryStore;

fn server_with_body_limit(max_body_bytes: usize) -> TestServer {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_body_bytes,
        model_path: None,
        auth: AuthConfig::new("integration-test-secret".to_string()).unwrap(),
    };
    let validator = Arc::new(TokenValidator::new(&config.auth));
    let issuer = Arc::new(TokenIssuer::new(&config.auth));
    let state = AppState::new(
        Arc::new(LinearModel::builtin()),
        Arc::new(MemoryStore::new()),
        validator,
        issuer,
        config,
    );
    let config = TestServerConfig::builder().http_transport().build();
    TestServer::new_with_config(create_router(state), config).unwrap()
}

fn server() -> TestServer {
    server_with_body_limit(10_000_000)
}

async fn register_and_login(server: &TestServer) -> String {
    let register = server
        .post("/register")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "correct horse",
        }))
        .await;
    assert_eq!(register.status_code(), StatusCode::CREATED);

    let login = server
        .post("/login")
        .json(&json!({
            "email": "ada@example.com",
            "password": "correct horse",
        }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);

    let body = login.json::<Value>();
    assert_eq!(body["status"], "success");
    body["data"]["token"].as_str().unwrap().to_string()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

#[tokio::test]
async fn protected_route_without_token_gets_unauthorized_envelope() {
    let server = server();

    let response = server
        .post("/predict")
        .json(&json!({ "data": [1.0, 2.0, 3.0, 4.0] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "status": "fail",
            "error": "Unauthorized",
            "message": "Missing authentication",
            "user": null,
        })
    );
}

#[tokio::test]
async fn garbage_token_gets_unauthorized_envelope() {
    let server = server();

    let response = server
        .post("/predict")
        .add_header(AUTHORIZATION, bearer("not-a-token"))
        .json(&json!({ "data": [1.0, 2.0, 3.0, 4.0] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "fail");
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["user"], Value::Null);
}

#[tokio::test]
async fn login_with_wrong_password_gets_unauthorized_envelope() {
    let server = server();
    register_and_login(&server).await;

    let response = server
        .post("/login")
        .json(&json!({ "email": "ada@example.com", "password": "wrong" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "status": "fail",
            "error": "Unauthorized",
            "message": "invalid email or password",
            "user": null,
        })
    );
}

#[tokio::test]
async fn duplicate_registration_is_an_input_failure() {
    let server = server();
    register_and_login(&server).await;

    let response = server
        .post("/register")
        .json(&json!({
            "email": "ada@example.com",
            "password": "another pass",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "fail", "message": "email is already registered" })
    );
}

#[tokio::test]
async fn predict_history_and_search_flow() {
    let server = server();
    let token = register_and_login(&server).await;

    // Strongly positive and strongly negative inputs for the built-in model.
    for data in [[5.0, 0.0, 5.0, 5.0], [-5.0, 5.0, -5.0, -5.0]] {
        let response = server
            .post("/predict")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "data": data }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["status"], "success");
        assert!(body["data"]["label"].as_str().is_some());
    }

    let history = server
        .get("/predict/histories")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(history.status_code(), StatusCode::OK);
    let body = history.json::<Value>();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let search = server
        .get("/predictions/search?label=positive")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(search.status_code(), StatusCode::OK);
    let body = search.json::<Value>();
    let labels: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["positive"]);
}

#[tokio::test]
async fn cookie_token_is_accepted() {
    let server = server();
    let token = register_and_login(&server).await;

    let response = server
        .get("/predict/histories")
        .add_header(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; token={token}")).unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "success");
}

#[tokio::test]
async fn empty_input_is_an_input_failure_with_chosen_status() {
    let server = server();
    let token = register_and_login(&server).await;

    let response = server
        .post("/predict")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "data": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "fail", "message": "data must not be empty" })
    );
}

#[tokio::test]
async fn wrong_arity_surfaces_the_model_message() {
    let server = server();
    let token = register_and_login(&server).await;

    let response = server
        .post("/predict")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "data": [1.0] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "fail", "message": "input has 1 values, model expects 4" })
    );
}

#[tokio::test]
async fn invalid_search_parameter_is_an_input_failure() {
    let server = server();
    let token = register_and_login(&server).await;

    let response = server
        .get("/predictions/search?min_score=1.5")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "fail", "message": "min_score must be between 0 and 1" })
    );
}

#[tokio::test]
async fn oversized_payload_gets_the_fixed_message() {
    // A deliberately tiny live limit: the envelope message must still be
    // the published constant, not derived from the configured value.
    let server = server_with_body_limit(64);

    let big = vec![1.0; 512];
    let response = server.post("/predict").json(&json!({ "data": big })).await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "fail", "message": PAYLOAD_TOO_LARGE_MESSAGE })
    );
}

#[tokio::test]
async fn unknown_route_is_normalized() {
    let server = server();

    let response = server.get("/nope").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "fail", "message": "Not Found" })
    );
}

#[tokio::test]
async fn non_json_body_is_normalized() {
    let server = server();
    let token = register_and_login(&server).await;

    let response = server
        .post("/predict")
        .add_header(AUTHORIZATION, bearer(&token))
        .text("this is not json")
        .await;

    assert!(response.status_code().is_client_error());
    assert_eq!(response.json::<Value>()["status"], "fail");
}

#[tokio::test]
async fn successful_responses_pass_through_unwrapped() {
    let server = server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn histories_are_scoped_to_the_caller() {
    let server = server();
    let token = register_and_login(&server).await;

    server
        .post("/predict")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "data": [1.0, 1.0, 1.0, 1.0] }))
        .await;

    // A second user sees an empty history.
    let register = server
        .post("/register")
        .json(&json!({ "email": "bob@example.com", "password": "long enough" }))
        .await;
    assert_eq!(register.status_code(), StatusCode::CREATED);
    let login = server
        .post("/login")
        .json(&json!({ "email": "bob@example.com", "password": "long enough" }))
        .await;
    let other = login.json::<Value>()["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let history = server
        .get("/predict/histories")
        .add_header(AUTHORIZATION, bearer(&other))
        .await;
    assert_eq!(history.status_code(), StatusCode::OK);
    assert_eq!(history.json::<Value>()["data"].as_array().unwrap().len(), 0);
}
