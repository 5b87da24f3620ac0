//! Shared setup for the integration suite. These tests need a running
//! Postgres; they skip (with a note on stderr) when DATABASE_URL is unset so
//! the unit suite stays runnable anywhere.

#![allow(dead_code)]

use dotenv::dotenv;
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use uuid::Uuid;

/// Connects to the test database and applies migrations. Returns `None` (and
/// the caller should return early) when DATABASE_URL is not configured.
pub async fn try_pool() -> Option<PgPool> {
    dotenv().ok();

    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }

    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping integration test: DATABASE_URL not set");
            return None;
        }
    };

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test DB");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Removes a user and every task referencing it (the task FKs are RESTRICT).
pub async fn cleanup_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query(
        "DELETE FROM task WHERE assigned_to IN (SELECT id FROM users WHERE email = $1) \
            OR created_by IN (SELECT id FROM users WHERE email = $1)",
    )
    .bind(email)
    .execute(pool)
    .await;
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

/// Unwraps the `{status, message, data}` success envelope and deserializes
/// `data`, asserting the envelope shape on the way.
pub fn envelope_data<T: DeserializeOwned>(body: &[u8]) -> T {
    let value: serde_json::Value =
        serde_json::from_slice(body).expect("response body should be JSON");
    assert_eq!(
        value["status"], "success",
        "expected success envelope, got: {}",
        value
    );
    serde_json::from_value(value["data"].clone()).expect("failed to deserialize envelope data")
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

/// Signs up and logs in a user through the HTTP surface, returning its id and
/// bearer token.
pub async fn signup_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    role: &str,
    password: &str,
) -> TestUser {
    use actix_web::test;

    let signup_payload = serde_json::json!({
        "email": email,
        "firstName": "Test",
        "lastName": "User",
        "role": role,
        "password": password,
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(&signup_payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "signup failed for {}: {}",
        email,
        String::from_utf8_lossy(&body)
    );

    let login_payload = serde_json::json!({"email": email, "password": password});
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&login_payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::OK,
        "login failed for {}: {}",
        email,
        String::from_utf8_lossy(&body)
    );

    let login: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let token = login["data"]["accessToken"]
        .as_str()
        .expect("login should return accessToken")
        .to_string();
    let id = login["data"]["user"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("login should return the user id");

    TestUser { id, token }
}
