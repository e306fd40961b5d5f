//! Test helpers for Web API integration tests.
//!
//! Provides a router-backed `TestServer` over an in-memory database with one
//! seeded account, plus login and request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};

use ssis::config::WebConfig;
use ssis::web::{create_router, AppState};
use ssis::{CredentialStore, Database};

/// Username of the seeded account.
pub const ADMIN_USERNAME: &str = "admin";
/// Email of the seeded account.
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// Password of the seeded account.
pub const ADMIN_PASSWORD: &str = "password123";

/// Create a test configuration.
pub fn create_test_config() -> WebConfig {
    WebConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        jwt_secret: "test-secret-key-for-testing-only".to_string(),
        jwt_access_token_expiry_secs: 300,
        login_rate_limit: 100,
        trust_proxy_headers: false,
    }
}

/// Create a test server with the given configuration.
pub async fn create_test_server_with(config: WebConfig) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    CredentialStore::new(db.pool())
        .register(ADMIN_USERNAME, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("Failed to seed account");

    let app_state = Arc::new(AppState::new(
        db.clone(),
        &config.jwt_secret,
        config.jwt_access_token_expiry_secs,
    ));

    let router = create_router(app_state, &config);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Create a test server with an in-memory database and a seeded account.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with(create_test_config()).await
}

/// Log in and return the raw response body.
pub async fn login(server: &TestServer, username: &str, password: &str) -> Value {
    server
        .post("/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await
        .json::<Value>()
}

/// Log in as the seeded account and return the access token.
pub async fn admin_token(server: &TestServer) -> String {
    let body = login(server, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    body["access_token"]
        .as_str()
        .expect("No access token")
        .to_string()
}

/// Attach a bearer token to a request.
pub fn bearer(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(AUTHORIZATION, format!("Bearer {}", token))
}

/// Create a college and return its id.
pub async fn create_college(server: &TestServer, token: &str, code: &str, name: &str) -> i64 {
    let response = bearer(server.post("/colleges"), token)
        .json(&json!({
            "college_code": code,
            "college_name": name
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["college"]["id"]
        .as_i64()
        .expect("No college id")
}

/// Create a program and return its id.
pub async fn create_program(
    server: &TestServer,
    token: &str,
    code: &str,
    name: &str,
    college_id: i64,
) -> i64 {
    let response = bearer(server.post("/programs"), token)
        .json(&json!({
            "program_code": code,
            "program_name": name,
            "college_id": college_id
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["program"]["id"]
        .as_i64()
        .expect("No program id")
}

/// Student payload with the given id number and program.
pub fn student_json(id_number: &str, program_id: Option<i64>) -> Value {
    json!({
        "id_number": id_number,
        "first_name": "juan",
        "last_name": "dela cruz",
        "gender": "Male",
        "year_level": "1",
        "program_id": program_id
    })
}
