use crate::{
    auth::{LoginRequest, SignupRequest},
    error::AppError,
    response::ApiResponse,
    services::AuthService,
};
use actix_web::{post, web, Responder};
use validator::Validate;

/// Register a new user (open variant).
///
/// Responds 201 with the public profile, or 409 when the email is taken.
#[post("/signup")]
pub async fn signup(
    service: web::Data<AuthService>,
    payload: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let user = service.signup(payload.into_inner()).await?;

    Ok(ApiResponse::created("User successfully registered", user))
}

/// Authenticate with email and password.
///
/// Responds with `{accessToken, user}`; wrong password and unknown email are
/// indistinguishable 401s.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let login = service.login(&payload.email, &payload.password).await?;

    Ok(ApiResponse::ok("Login successful", login))
}

/// Stateless logout; always succeeds.
#[post("/logout")]
pub async fn logout(service: web::Data<AuthService>) -> Result<impl Responder, AppError> {
    Ok(ApiResponse::ok("Logout successful", service.logout()))
}
