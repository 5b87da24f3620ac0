mod common;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::StatusCode, test, web, App};
use serde_json::json;
use taskdesk::auth::AuthMiddleware;
use taskdesk::models::PublicUser;
use taskdesk::routes::{self, health};
use taskdesk::services::{AuthService, TaskService, UserService};

macro_rules! build_app {
    ($pool:expr) => {{
        let user_service = UserService::new($pool.clone());
        let auth_service = AuthService::new(user_service.clone());
        let task_service = TaskService::new($pool.clone(), user_service.clone());
        test::init_service(
            App::new()
                .app_data(web::Data::new(user_service))
                .app_data(web::Data::new(auth_service))
                .app_data(web::Data::new(task_service))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(health::health)
                .service(
                    web::scope("/api")
                        .wrap(AuthMiddleware)
                        .configure(routes::config),
                ),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_signup_login_profile_flow() {
    let Some(pool) = common::try_pool().await else { return };
    let app = build_app!(pool);

    let email = "alice_flow@example.com";
    common::cleanup_user(&pool, email).await;

    // Signup
    let signup_payload = json!({
        "email": email,
        "firstName": "Alice",
        "lastName": "Smith",
        "role": "USER",
        "password": "Password@123",
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(&signup_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = test::read_body(resp).await;
    let raw: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(
        raw["data"].get("password").is_none(),
        "signup must not echo the password: {}",
        raw
    );
    let created: PublicUser = common::envelope_data(&body);
    assert_eq!(created.email, email);

    // Duplicate signup conflicts
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(&signup_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = test::read_body(resp).await;
    let conflict: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(conflict["statusCode"], 409);
    assert_eq!(conflict["message"], "Email already exists");

    // Login
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({"email": email, "password": "Password@123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let login: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let token = login["data"]["accessToken"].as_str().unwrap().to_string();
    assert!(!token.is_empty());
    assert_eq!(login["data"]["user"]["email"], email);
    assert!(login["data"]["user"].get("password").is_none());

    // Profile round trip with the issued token
    let req = test::TestRequest::get()
        .uri("/api/users/profile")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let profile: PublicUser = common::envelope_data(&body);
    assert_eq!(profile.email, email);
    assert_eq!(profile.id, created.id);

    // Logout always succeeds, token or not
    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    common::cleanup_user(&pool, email).await;
}

#[actix_rt::test]
async fn test_failed_logins_are_indistinguishable() {
    let Some(pool) = common::try_pool().await else { return };
    let app = build_app!(pool);

    let email = "alice_enum@example.com";
    common::cleanup_user(&pool, email).await;
    common::signup_and_login(&app, email, "USER", "Password@123").await;

    // Wrong password for an existing account
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({"email": email, "password": "Wrong@12345"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value =
        serde_json::from_slice(&test::read_body(resp).await).unwrap();

    // Unknown email
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({"email": "nobody_enum@example.com", "password": "Password@123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown_email: serde_json::Value =
        serde_json::from_slice(&test::read_body(resp).await).unwrap();

    // Identical bodies: no account enumeration
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["message"], "Invalid email or password");

    common::cleanup_user(&pool, email).await;
}

#[actix_rt::test]
async fn test_invalid_signup_inputs() {
    let Some(pool) = common::try_pool().await else { return };
    let app = build_app!(pool);

    let test_cases = vec![
        (
            json!({"firstName": "A", "lastName": "B", "role": "USER", "password": "Password@123"}),
            "missing email",
        ),
        (
            json!({"email": "not-an-email", "firstName": "A", "lastName": "B", "role": "USER", "password": "Password@123"}),
            "invalid email format",
        ),
        (
            json!({"email": "weak@example.com", "firstName": "A", "lastName": "B", "role": "USER", "password": "password"}),
            "weak password",
        ),
        (
            json!({"email": "blank@example.com", "firstName": "", "lastName": "B", "role": "USER", "password": "Password@123"}),
            "blank first name",
        ),
        (
            json!({"email": "role@example.com", "firstName": "A", "lastName": "B", "role": "SUPERADMIN", "password": "Password@123"}),
            "unknown role",
        ),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        assert_eq!(
            status,
            StatusCode::BAD_REQUEST,
            "case '{}': expected 400, got {}. Body: {}",
            description,
            status,
            String::from_utf8_lossy(&body)
        );
    }
}

#[actix_rt::test]
async fn test_malformed_json_body_gets_error_envelope() {
    let Some(pool) = common::try_pool().await else { return };
    let app = build_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].is_string());
}

#[actix_rt::test]
async fn test_invalid_login_inputs() {
    let Some(pool) = common::try_pool().await else { return };
    let app = build_app!(pool);

    let test_cases = vec![
        (json!({"password": "Password@123"}), "missing email"),
        (
            json!({"email": "bad-format", "password": "Password@123"}),
            "invalid email format",
        ),
        (
            json!({"email": "x@example.com", "password": "123"}),
            "password too short",
        ),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        assert_eq!(
            status,
            StatusCode::BAD_REQUEST,
            "case '{}': expected 400, got {}. Body: {}",
            description,
            status,
            String::from_utf8_lossy(&body)
        );
    }
}
